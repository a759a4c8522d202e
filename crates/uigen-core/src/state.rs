//! Pipeline state machine

use serde::{Deserialize, Serialize};

/// Where a pipeline run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Not started
    #[default]
    Idle,
    /// Generation running
    Generating,
    /// Critique running
    Critiquing,
    /// Validation running
    Validating,
    /// Export running
    Exporting,
    /// Finished
    Done,
    /// Halted
    Errored,
}

/// Illegal state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal pipeline transition {from:?} -> {to:?}")]
pub struct IllegalTransition {
    /// Current state
    pub from: PipelineState,
    /// Requested state
    pub to: PipelineState,
}

impl PipelineState {
    /// True for `Done` and `Errored`
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Errored)
    }
}

/// States reachable from `from`
#[must_use]
pub fn allowed_transitions(from: PipelineState) -> &'static [PipelineState] {
    use PipelineState::{Critiquing, Done, Errored, Exporting, Generating, Idle, Validating};
    match from {
        Idle => &[Generating],
        Generating => &[Critiquing, Validating, Errored],
        Critiquing => &[Validating, Errored],
        Validating => &[Exporting, Done, Errored],
        Exporting => &[Done, Errored],
        Done | Errored => &[],
    }
}

/// Check a transition against the table
///
/// # Errors
/// Returns [`IllegalTransition`] if `to` is not reachable from `from`
pub fn validate_transition(from: PipelineState, to: PipelineState) -> Result<(), IllegalTransition> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(IllegalTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        use PipelineState::*;
        let path = [Idle, Generating, Critiquing, Validating, Exporting, Done];
        for pair in path.windows(2) {
            assert!(validate_transition(pair[0], pair[1]).is_ok());
        }
    }

    #[test]
    fn optional_stages_can_be_skipped() {
        use PipelineState::*;
        assert!(validate_transition(Generating, Validating).is_ok());
        assert!(validate_transition(Validating, Done).is_ok());
    }

    #[test]
    fn errored_reachable_from_every_stage() {
        use PipelineState::*;
        for state in [Generating, Critiquing, Validating, Exporting] {
            assert!(validate_transition(state, Errored).is_ok());
        }
        assert!(validate_transition(Idle, Errored).is_err());
    }

    #[test]
    fn terminal_states_are_final() {
        use PipelineState::*;
        assert!(Done.is_terminal());
        assert!(allowed_transitions(Errored).is_empty());
        let err = validate_transition(Validating, Generating).unwrap_err();
        assert_eq!(err.from, Validating);
    }
}
