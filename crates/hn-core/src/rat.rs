//! Radio access technologies and per-node capability sets.
//!
//! A node's capabilities are resolved once at provisioning and stored as a
//! small bit set.  Code that needs per-RAT behaviour iterates [`Rat::ALL`]
//! and asks the set, rather than inspecting device types.

use std::fmt;

/// A radio access technology a cell serves on and a terminal may attach with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rat {
    /// Macro-cell LTE.
    Lte,
    /// Small-cell millimetre wave.
    MmWave,
}

impl Rat {
    /// Every RAT in ascending order.  Fixed-size so per-RAT tables can be
    /// plain arrays indexed by [`Rat::index`].
    pub const ALL: [Rat; 2] = [Rat::Lte, Rat::MmWave];

    /// Preference order for single-connectivity terminals: small cells first.
    pub const PREFERENCE: [Rat; 2] = [Rat::MmWave, Rat::Lte];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The capability a node needs to use this RAT.
    #[inline]
    pub fn capability(self) -> Capability {
        match self {
            Rat::Lte    => Capability::Lte,
            Rat::MmWave => Capability::MmWave,
        }
    }

    /// Lower-case label, used for CSV columns and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Rat::Lte    => "lte",
            Rat::MmWave => "mmwave",
        }
    }
}

impl fmt::Display for Rat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Capability ────────────────────────────────────────────────────────────────

/// One capability flag a node may carry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    Lte,
    MmWave,
    /// May hold one attachment per supported RAT at the same time.
    MultiConnectivity,
}

impl Capability {
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Capability::Lte               => 0b001,
            Capability::MmWave            => 0b010,
            Capability::MultiConnectivity => 0b100,
        }
    }
}

// ── CapabilitySet ─────────────────────────────────────────────────────────────

/// A set of [`Capability`] flags stored in one byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Capability>", into = "Vec<Capability>"))]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    /// LTE + mmWave + multi-connectivity: the dual-stack terminal of the
    /// reference scenario.
    pub fn multi_connectivity() -> Self {
        Self::EMPTY
            .with(Capability::Lte)
            .with(Capability::MmWave)
            .with(Capability::MultiConnectivity)
    }

    /// The set containing only the capability for `rat` (a cell site).
    pub fn single(rat: Rat) -> Self {
        Self::EMPTY.with(rat.capability())
    }

    #[inline]
    pub fn with(self, cap: Capability) -> Self {
        CapabilitySet(self.0 | cap.bit())
    }

    #[inline]
    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    #[inline]
    pub fn supports(self, rat: Rat) -> bool {
        self.contains(rat.capability())
    }

    #[inline]
    pub fn is_multi_connectivity(self) -> bool {
        self.contains(Capability::MultiConnectivity)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Supported RATs in ascending [`Rat`] order.
    pub fn rats(self) -> impl Iterator<Item = Rat> {
        Rat::ALL.into_iter().filter(move |&r| self.supports(r))
    }

    /// All capability flags present, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        [Capability::Lte, Capability::MmWave, Capability::MultiConnectivity]
            .into_iter()
            .filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, CapabilitySet::with)
    }
}

impl From<Vec<Capability>> for CapabilitySet {
    fn from(caps: Vec<Capability>) -> Self {
        caps.into_iter().collect()
    }
}

impl From<CapabilitySet> for Vec<Capability> {
    fn from(set: CapabilitySet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
