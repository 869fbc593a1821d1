//! `hn-sim`: the attachment-and-energy-accounting driver.
//!
//! # Run loop
//!
//! ```text
//! Provisioning  create terminals, mmWave cells, LTE cells; build topology
//! Attaching     attach_closest once; schedule boundaries k·T, k = 0..K-1
//! Accounting(k) for each boundary released before the stop time:
//!                 ① k > 0: advance mobility by T (and re-attach if enabled)
//!                 ② evaluate every terminal once (parallel with `parallel`)
//!                 ③ record samples in ascending terminal id
//! Finished      scheduler destroyed; samples + diagnostics are the output
//! Failed        any fatal error; later calls return InvalidPhase
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Per-terminal energy evaluation on Rayon's thread pool.   |
//! | `serde`    | Serialize/Deserialize on `Diagnostic`.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hn_core::ScenarioConfig;
//! use hn_energy::FixedWorkload;
//! use hn_mobility::RandomWalk2d;
//! use hn_sim::{NoopObserver, SimBuilder};
//!
//! let config = ScenarioConfig::default();
//! let walk = RandomWalk2d::from_config(config.topology.area, &config.run);
//! let mut sim = SimBuilder::new(config, FixedWorkload::default(), walk).build()?;
//! sim.run(&mut NoopObserver)?;
//! for s in sim.samples() {
//!     println!("{s}");
//! }
//! ```

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;


pub use builder::SimBuilder;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scheduler::{EventQueue, Scheduler, SimEvent};
pub use sim::{Sim, SimPhase};
