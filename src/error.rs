use crate::*;

/// The error taxonomy surfaced at every public API boundary (spec §6, §7).
///
/// Configuration and input errors are collected exhaustively before being
/// returned — see [`ConfigDiagnostics`] — so a caller sees every offending
/// field in one pass rather than fixing them one at a time. Search failures
/// carry the failing row index so callers can inspect the offending chart
/// section. Internal invariant violations are not represented here: per
/// spec §7 they are fatal assertions (`debug_assert!`/`unreachable!`), not
/// recoverable errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    #[error("config invalid: {0}")]
    ConfigInvalid(ConfigDiagnostics),

    #[error("pad invalid: {0}")]
    PadInvalid(String),

    #[error("no valid assignment at row {row}: none of {candidate_lanes:?} could be stepped on")]
    NoValidAssignment {
        row: usize,
        candidate_lanes: Vec<Lane>,
    },

    #[error("no target mapping at row {row}: source step kind has no counterpart on the target pad")]
    NoTargetMapping { row: usize },

    #[error("search cancelled after {rows_completed} rows")]
    Cancelled {
        rows_completed: usize,
        /// The best partial path found before cancellation. Explicitly
        /// non-final: never used as a substitute for a completed search.
        best_partial: Vec<GraphLinkInstance>,
    },
}

/// All validation failures collected from one config/pad-geometry pass.
///
/// Every field is checked and every message appended before the caller
/// ever sees an error — no leaf check short-circuits the rest (spec §7).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    pub messages: Vec<String>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes the diagnostics, returning `Err` if any message was
    /// recorded and `Ok(())` otherwise.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ConfigInvalid(self))
        }
    }
}

impl std::fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
