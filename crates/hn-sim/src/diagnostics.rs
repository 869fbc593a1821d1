//! Recoverable problems collected during a run.

use std::fmt;

use hn_core::{IntervalIndex, NodeId, Rat};

/// One recoverable problem.  Fatal problems are [`SimError`][crate::SimError]s
/// instead.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// `terminal` needed `rat` but `rat` had no candidate cells.
    Unattached { terminal: NodeId, rat: Rat },

    /// No sample was recorded for `terminal` in `interval`.
    SkippedTerminal { terminal: NodeId, interval: IntervalIndex, reason: String },
}

impl Diagnostic {
    /// Short machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::Unattached { .. } => "unattached",
            Diagnostic::SkippedTerminal { .. } => "skipped_terminal",
        }
    }

    pub fn terminal(&self) -> NodeId {
        match self {
            Diagnostic::Unattached { terminal, .. } | Diagnostic::SkippedTerminal { terminal, .. } => *terminal,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unattached { terminal, rat } => {
                write!(f, "{terminal} unattached on {rat}: no candidate cells")
            }
            Diagnostic::SkippedTerminal { terminal, interval, reason } => {
                write!(f, "{terminal} skipped in {interval}: {reason}")
            }
        }
    }
}

/// Append-only list of [`Diagnostic`]s in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terminals skipped in `interval`.
    pub fn skipped_in(&self, interval: IntervalIndex) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().filter_map(move |d| match d {
            Diagnostic::SkippedTerminal { terminal, interval: k, .. } if *k == interval => Some(*terminal),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
