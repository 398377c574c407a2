//! State machine trait for status enums.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal edges; `transition_to` then rejects
/// everything else with a `ValidationError`.
///
/// ```ignore
/// let next = SubscriptionStatus::Active.transition_to(SubscriptionStatus::Expired)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        Amber,
        Red,
        Broken,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Green => vec![Amber, Broken],
                Amber => vec![Red, Broken],
                Red => vec![Green, Broken],
                Broken => vec![],
            }
        }
    }

    #[test]
    fn legal_edge_is_accepted() {
        assert_eq!(Light::Green.transition_to(Light::Amber), Ok(Light::Amber));
    }

    #[test]
    fn illegal_edge_names_both_states() {
        let err = Light::Green.transition_to(Light::Red).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Green"));
        assert!(text.contains("Red"));
    }

    #[test]
    fn only_sink_state_is_terminal() {
        assert!(Light::Broken.is_terminal());
        assert!(!Light::Green.is_terminal());
        assert!(!Light::Red.is_terminal());
    }
}
