//! Round state machine.

use serde::{Deserialize, Serialize};

/// Where the game is in its round cycle.
///
/// `start_new_round` is the only way out of `AwaitingRoundStart` and `RoundComplete`.
/// A round completes when its last pending hospital submits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    /// No teams registered yet
    Setup,
    /// Teams registered, first round not started
    AwaitingRoundStart,
    /// Hospitals still owing a diagnosis, in registration order
    RoundInProgress { pending: Vec<String> },
    /// Every hospital has submitted for the current round
    RoundComplete,
    /// Final round resolved
    GameOver,
}

impl GamePhase {
    /// Whether the phase allows a new round. Starting one mid-round supersedes
    /// the pending patients; the round cap is checked by the engine.
    pub fn can_start_round(&self) -> bool {
        matches!(
            self,
            GamePhase::AwaitingRoundStart
                | GamePhase::RoundComplete
                | GamePhase::RoundInProgress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_start_round() {
        assert!(!GamePhase::Setup.can_start_round());
        assert!(GamePhase::AwaitingRoundStart.can_start_round());
        assert!(GamePhase::RoundComplete.can_start_round());
        assert!(GamePhase::RoundInProgress { pending: vec!["A".into()] }.can_start_round());
        assert!(!GamePhase::GameOver.can_start_round());
    }
}
