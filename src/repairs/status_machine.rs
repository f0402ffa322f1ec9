use crate::repairs::models::RepairStatus;

/// State machine for repair order status transitions
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Pending → InProgress, Cancelled
    /// - InProgress → Completed, Cancelled
    /// - Completed → Delivered
    /// - Delivered → (terminal)
    /// - Cancelled → (terminal)
    /// - Any status → Same status (idempotent)
    pub fn is_valid_transition(from: RepairStatus, to: RepairStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        match (from, to) {
            // From Pending
            (RepairStatus::Pending, RepairStatus::InProgress) => true,
            (RepairStatus::Pending, RepairStatus::Cancelled) => true,

            // From InProgress
            (RepairStatus::InProgress, RepairStatus::Completed) => true,
            (RepairStatus::InProgress, RepairStatus::Cancelled) => true,

            // From Completed
            (RepairStatus::Completed, RepairStatus::Delivered) => true,

            // Delivered and Cancelled are terminal
            (RepairStatus::Delivered, _) => false,
            (RepairStatus::Cancelled, _) => false,

            // All other transitions are invalid
            _ => false,
        }
    }

    /// Attempt to transition from one status to another
    ///
    /// Returns `Ok(to)` if the transition is valid, `Err(message)` otherwise.
    pub fn transition(from: RepairStatus, to: RepairStatus) -> Result<RepairStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_to_in_progress() {
        assert!(StatusMachine::is_valid_transition(
            RepairStatus::Pending,
            RepairStatus::InProgress
        ));
    }

    #[test]
    fn test_pending_to_cancelled() {
        assert!(StatusMachine::is_valid_transition(
            RepairStatus::Pending,
            RepairStatus::Cancelled
        ));
    }

    #[test]
    fn test_in_progress_to_completed() {
        assert!(StatusMachine::is_valid_transition(
            RepairStatus::InProgress,
            RepairStatus::Completed
        ));
    }

    #[test]
    fn test_in_progress_to_cancelled() {
        assert!(StatusMachine::is_valid_transition(
            RepairStatus::InProgress,
            RepairStatus::Cancelled
        ));
    }

    #[test]
    fn test_completed_to_delivered() {
        assert!(StatusMachine::is_valid_transition(
            RepairStatus::Completed,
            RepairStatus::Delivered
        ));
    }

    #[test]
    fn test_pending_cannot_skip_to_completed() {
        assert!(!StatusMachine::is_valid_transition(
            RepairStatus::Pending,
            RepairStatus::Completed
        ));
    }

    #[test]
    fn test_pending_cannot_skip_to_delivered() {
        assert!(!StatusMachine::is_valid_transition(
            RepairStatus::Pending,
            RepairStatus::Delivered
        ));
    }

    #[test]
    fn test_completed_cannot_be_cancelled() {
        assert!(!StatusMachine::is_valid_transition(
            RepairStatus::Completed,
            RepairStatus::Cancelled
        ));
    }

    #[test]
    fn test_completed_cannot_regress() {
        assert!(!StatusMachine::is_valid_transition(
            RepairStatus::Completed,
            RepairStatus::InProgress
        ));
    }

    #[test]
    fn test_delivered_is_terminal() {
        for to in [
            RepairStatus::Pending,
            RepairStatus::InProgress,
            RepairStatus::Completed,
            RepairStatus::Cancelled,
        ] {
            assert!(!StatusMachine::is_valid_transition(
                RepairStatus::Delivered,
                to
            ));
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for to in [
            RepairStatus::Pending,
            RepairStatus::InProgress,
            RepairStatus::Completed,
            RepairStatus::Delivered,
        ] {
            assert!(!StatusMachine::is_valid_transition(
                RepairStatus::Cancelled,
                to
            ));
        }
    }

    #[test]
    fn test_same_status_is_idempotent() {
        for status in [
            RepairStatus::Pending,
            RepairStatus::InProgress,
            RepairStatus::Completed,
            RepairStatus::Delivered,
            RepairStatus::Cancelled,
        ] {
            assert!(StatusMachine::is_valid_transition(status, status));
        }
    }

    #[test]
    fn test_transition_returns_target_status() {
        assert_eq!(
            StatusMachine::transition(RepairStatus::Pending, RepairStatus::InProgress),
            Ok(RepairStatus::InProgress)
        );
    }

    #[test]
    fn test_invalid_transition_names_both_states() {
        let err =
            StatusMachine::transition(RepairStatus::Delivered, RepairStatus::Pending).unwrap_err();
        assert!(err.contains("delivered"));
        assert!(err.contains("pending"));
    }
}
