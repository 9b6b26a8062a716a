//! Import phases.

use std::fmt;

/// The phase of an import run.
///
/// A run starts in [`ImportPhase::Snapshot`] and may move once to
/// [`ImportPhase::Delta`]. Inactive rows only retract state during the
/// delta phase; axiom members are the exception and retract in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImportPhase {
    /// Bulk load of the full current state.
    #[default]
    Snapshot,
    /// Incremental changes on top of a snapshot, including retractions.
    Delta,
}

impl ImportPhase {
    /// Returns true during the delta phase.
    pub fn is_delta(self) -> bool {
        self == ImportPhase::Delta
    }
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::Snapshot => write!(f, "snapshot"),
            ImportPhase::Delta => write!(f, "delta"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_start_in_snapshot() {
        assert_eq!(ImportPhase::default(), ImportPhase::Snapshot);
        assert!(!ImportPhase::Snapshot.is_delta());
        assert!(ImportPhase::Delta.is_delta());
    }

    #[test]
    fn test_display() {
        assert_eq!(ImportPhase::Snapshot.to_string(), "snapshot");
        assert_eq!(ImportPhase::Delta.to_string(), "delta");
    }
}
