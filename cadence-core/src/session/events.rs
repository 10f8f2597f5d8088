//! Session inputs and outcomes

/// User intents accepted by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    /// Start or pause the countdown of a timed step
    ToggleRun,
    /// Stop and restore the active step's full duration
    Reset,
    /// Mark the active step complete and move to the next one
    Advance,
    /// Make the step at this index active
    JumpTo(usize),
}

/// What a transition did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Countdown started or resumed
    Started,
    /// Countdown paused
    Paused,
    /// Active step restored to its full duration
    Reset { index: usize },
    /// User completed a step and moved on
    Advanced { index: usize },
    /// A countdown ran out and the next step became active
    AutoAdvanced { index: usize },
    /// User selected a step directly
    Jumped { index: usize },
    /// The final countdown ran out
    Completed,
    /// Session returned to the first step
    Restarted,
}

impl SessionEvent {
    /// New active index, for events that change the active step
    pub fn step_index(&self) -> Option<usize> {
        match self {
            SessionEvent::Advanced { index }
            | SessionEvent::AutoAdvanced { index }
            | SessionEvent::Jumped { index } => Some(*index),
            SessionEvent::Restarted => Some(0),
            _ => None,
        }
    }

    /// Check if this event came from the countdown rather than the user
    pub fn is_automatic(&self) -> bool {
        matches!(
            self,
            SessionEvent::AutoAdvanced { .. } | SessionEvent::Completed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_index() {
        assert_eq!(SessionEvent::Advanced { index: 3 }.step_index(), Some(3));
        assert_eq!(SessionEvent::AutoAdvanced { index: 4 }.step_index(), Some(4));
        assert_eq!(SessionEvent::Jumped { index: 0 }.step_index(), Some(0));
        assert_eq!(SessionEvent::Restarted.step_index(), Some(0));
        assert_eq!(SessionEvent::Reset { index: 2 }.step_index(), None);
        assert_eq!(SessionEvent::Paused.step_index(), None);
    }

    #[test]
    fn test_automatic_events() {
        assert!(SessionEvent::AutoAdvanced { index: 1 }.is_automatic());
        assert!(SessionEvent::Completed.is_automatic());
        assert!(!SessionEvent::Advanced { index: 1 }.is_automatic());
        assert!(!SessionEvent::Started.is_automatic());
    }
}
