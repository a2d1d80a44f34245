//! Error types for the game state machine.

/// Why an action was not applied.
///
/// Two classes share this enum. Validation errors are surfaced to the
/// sender as an `errorMessage`. Authority and phase violations are
/// deliberately silent on the wire — the original protocol ignores them
/// without explanation, and clients depend on that — but they are named
/// here so callers can log them and tests can assert on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Empty or whitespace-only nickname.
    #[error("nickname and room id are required")]
    BlankNickname,

    /// A cell index outside the 40-cell loop.
    #[error("cell {0} is outside the board")]
    InvalidCell(usize),

    /// The acting player is not the current turn holder.
    #[error("not the current turn holder")]
    NotYourTurn,

    /// The claimed player id does not match the sending connection.
    #[error("claimed player id does not match the sender")]
    IdentityMismatch,

    /// A purchase decision is pending; only accept/decline are valid.
    #[error("a purchase decision is pending")]
    DecisionPending,

    /// Accept/decline arrived with no purchase offer outstanding.
    #[error("no purchase offer is pending")]
    NoPendingOffer,
}

impl GameError {
    /// Returns `true` for violations that are dropped without any wire
    /// response, per the protocol's ignore-don't-explain policy.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::NotYourTurn
                | Self::IdentityMismatch
                | Self::DecisionPending
                | Self::NoPendingOffer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_surfaced() {
        assert!(!GameError::BlankNickname.is_silent());
        assert!(!GameError::InvalidCell(99).is_silent());
    }

    #[test]
    fn test_authority_violations_are_silent() {
        assert!(GameError::NotYourTurn.is_silent());
        assert!(GameError::IdentityMismatch.is_silent());
        assert!(GameError::DecisionPending.is_silent());
        assert!(GameError::NoPendingOffer.is_silent());
    }
}
