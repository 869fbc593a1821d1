//! Unit tests for hn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellId, IntervalIndex, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CellId(0) < CellId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(CellId::default(), CellId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(CellId(7).to_string(), "CellId(7)");
    }

    #[test]
    fn interval_next() {
        assert_eq!(IntervalIndex(3).next(), IntervalIndex(4));
    }
}

#[cfg(test)]
mod geo {
    use crate::{Bounds, Coord};

    #[test]
    fn pythagorean_distance() {
        let a = Coord::new(0.0, 0.0);
        let b = Coord::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coord::new(12.5, -3.0);
        let b = Coord::new(-7.0, 40.25);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn reflect_inside_is_identity() {
        let b = Bounds::from_max(100.0, 50.0);
        let p = Coord::new(10.0, 20.0);
        assert_eq!(b.reflect(p), p);
    }

    #[test]
    fn reflect_bounces_off_walls() {
        let b = Bounds::from_max(100.0, 50.0);
        assert_eq!(b.reflect(Coord::new(110.0, -5.0)), Coord::new(90.0, 5.0));
        assert_eq!(b.reflect(Coord::new(-30.0, 60.0)), Coord::new(30.0, 40.0));
    }

    #[test]
    fn reflect_large_overshoot_stays_inside() {
        let b = Bounds::from_max(10.0, 10.0);
        let p = b.reflect(Coord::new(1234.5, -987.25));
        assert!(b.contains(p), "{p} escaped {b:?}");
    }

    #[test]
    fn degenerate_bounds_invalid() {
        assert!(!Bounds::from_max(0.0, 10.0).is_valid());
        assert!(Bounds::default().is_valid());
    }
}

#[cfg(test)]
mod rat {
    use crate::{Capability, CapabilitySet, Rat};

    #[test]
    fn multi_connectivity_set() {
        let caps = CapabilitySet::multi_connectivity();
        assert!(caps.supports(Rat::Lte));
        assert!(caps.supports(Rat::MmWave));
        assert!(caps.is_multi_connectivity());
        assert_eq!(caps.rats().collect::<Vec<_>>(), [Rat::Lte, Rat::MmWave]);
    }

    #[test]
    fn single_rat_set() {
        let caps = CapabilitySet::single(Rat::MmWave);
        assert!(!caps.supports(Rat::Lte));
        assert!(!caps.is_multi_connectivity());
        assert_eq!(caps.rats().collect::<Vec<_>>(), [Rat::MmWave]);
    }

    #[test]
    fn collect_from_capabilities() {
        let caps: CapabilitySet = [Capability::Lte, Capability::Lte].into_iter().collect();
        assert_eq!(caps, CapabilitySet::single(Rat::Lte));
        assert!(CapabilitySet::EMPTY.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Rat::MmWave.to_string(), "mmwave");
        assert_eq!(Rat::Lte.to_string(), "lte");
    }
}

#[cfg(test)]
mod time {
    use crate::{AccountingClock, IntervalIndex, SimTime};

    #[test]
    fn secs_roundtrip() {
        let t = SimTime::from_secs_f64(1.5);
        assert_eq!(t, SimTime(1_500_000));
        assert_eq!(t.as_secs_f64(), 1.5);
    }

    #[test]
    fn negative_saturates() {
        assert_eq!(SimTime::from_secs_f64(-3.0), SimTime::ZERO);
    }

    #[test]
    fn boundaries() {
        let mut clock = AccountingClock::new(0.25);
        assert_eq!(clock.boundary(IntervalIndex(0)), SimTime::ZERO);
        assert_eq!(clock.boundary(IntervalIndex(4)), SimTime::from_secs_f64(1.0));
        clock.advance();
        assert_eq!(clock.current, IntervalIndex(1));
        assert_eq!(clock.interval(), SimTime(250_000));
    }
}

#[cfg(test)]
mod rng {
    use crate::{NodeId, NodeRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = NodeRng::new(12345, NodeId(0));
        let mut r2 = NodeRng::new(12345, NodeId(0));
        for _ in 0..100 {
            let a: f64 = r1.gen_range(0.0..1.0);
            let b: f64 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_nodes_differ() {
        let mut r0 = NodeRng::new(1, NodeId(0));
        let mut r1 = NodeRng::new(1, NodeId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent nodes should diverge");
    }

    #[test]
    fn children_are_reproducible() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let x: u64 = a.child(1).random();
        let y: u64 = b.child(1).random();
        assert_eq!(x, y);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod config {
    use crate::{Bounds, CapabilitySet, HnError, ScenarioConfig};

    #[test]
    fn defaults_match_reference_scenario() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.topology.mmwave_cells, 4);
        assert_eq!(cfg.topology.lte_cells, 1);
        assert_eq!(cfg.topology.terminal_count(), 12);
        assert_eq!(cfg.topology.area, Bounds::from_max(4_000.0, 4_000.0));
        assert_eq!(cfg.energy.alpha, 0.5);
        assert_eq!(cfg.energy.beta, 10.0);
        assert_eq!(cfg.energy.interval_secs, 1.0);
        assert_eq!(cfg.run.stop_time_secs, 10.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_interval() {
        let mut cfg = ScenarioConfig::default();
        cfg.energy.interval_secs = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_alpha() {
        let mut cfg = ScenarioConfig::default();
        cfg.energy.alpha = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let mut cfg = ScenarioConfig::default();
        cfg.run.walk_speed_min = 5.0;
        cfg.run.walk_speed_max = 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_terminals_without_rat() {
        let mut cfg = ScenarioConfig::default();
        cfg.topology.terminal_capabilities = CapabilitySet::EMPTY;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_terminal_count_overflow() {
        let mut cfg = ScenarioConfig::default();
        cfg.topology.terminals_per_cell = u32::MAX;
        cfg.topology.mmwave_cells = 2;
        assert_eq!(cfg.topology.node_count(), None);
        assert_eq!(cfg.topology.terminal_count(), u32::MAX);
        assert!(matches!(cfg.validate(), Err(HnError::Config(_))));
    }

    #[test]
    fn rejects_node_count_overflow() {
        let mut cfg = ScenarioConfig::default();
        cfg.topology.terminals_per_cell = 1;
        cfg.topology.mmwave_cells = 1;
        cfg.topology.lte_cells = u32::MAX - 2;
        // One terminal + u32::MAX - 1 cells lands on the reserved INVALID id.
        assert_eq!(cfg.topology.node_count(), None);
        assert!(matches!(cfg.validate(), Err(HnError::Config(_))));

        cfg.topology.lte_cells = u32::MAX - 3;
        assert_eq!(cfg.topology.node_count(), Some(u32::MAX - 1));
    }
}
