use std::fmt;
use std::time::Duration;

use crate::domain::Severity;

/// How long a banner stays fully visible.
pub const ALERT_DISMISS_DELAY: Duration = Duration::from_secs(5);
/// Length of the fade transition before the container is hidden.
pub const ALERT_FADE_DURATION: Duration = Duration::from_millis(150);

/// Source of delays for the auto-dismiss transition.
#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Identifies one shown alert. Tickets of replaced alerts go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Hidden,
    Shown,
    Fading,
}

impl fmt::Display for AlertPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "Hidden"),
            Self::Shown => write!(f, "Shown"),
            Self::Fading => write!(f, "Fading"),
        }
    }
}

/// The single alert container. A new alert replaces whatever is shown.
#[derive(Debug, Default)]
pub struct AlertSlot {
    generation: u64,
    current: Option<(Alert, AlertPhase)>,
}

impl AlertSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> AlertTicket {
        self.generation += 1;
        self.current = Some((
            Alert {
                message: message.into(),
                severity,
            },
            AlertPhase::Shown,
        ));
        AlertTicket(self.generation)
    }

    /// Starts the fade of the alert `ticket` refers to. Returns `false` when
    /// that alert has been replaced or is no longer fully shown.
    pub fn begin_fade(&mut self, ticket: AlertTicket) -> bool {
        self.transition(ticket, AlertPhase::Shown, AlertPhase::Fading)
    }

    /// Hides the container once the fade of `ticket` has run.
    pub fn hide(&mut self, ticket: AlertTicket) -> bool {
        self.transition(ticket, AlertPhase::Fading, AlertPhase::Hidden)
    }

    fn transition(&mut self, ticket: AlertTicket, from: AlertPhase, to: AlertPhase) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match &mut self.current {
            Some((_, phase)) if *phase == from => {
                *phase = to;
                true
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> AlertPhase {
        self.current
            .as_ref()
            .map_or(AlertPhase::Hidden, |(_, phase)| *phase)
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref().map(|(alert, _)| alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_alert_fades_then_hides() {
        let mut slot = AlertSlot::new();
        assert_eq!(slot.phase(), AlertPhase::Hidden);

        let ticket = slot.show("Please select a state or district", Severity::Warning);
        assert_eq!(slot.phase(), AlertPhase::Shown);
        assert!(!slot.hide(ticket));

        assert!(slot.begin_fade(ticket));
        assert_eq!(slot.phase(), AlertPhase::Fading);
        assert!(slot.hide(ticket));
        assert_eq!(slot.phase(), AlertPhase::Hidden);
        assert!(!slot.begin_fade(ticket));
    }

    #[test]
    fn test_replaced_alert_ignores_stale_ticket() {
        let mut slot = AlertSlot::new();
        let first = slot.show("first", Severity::Info);
        let second = slot.show("second", Severity::Danger);

        assert_ne!(first, second);
        assert!(!slot.begin_fade(first));
        assert_eq!(slot.phase(), AlertPhase::Shown);
        assert_eq!(
            slot.current().map(|alert| alert.message.as_str()),
            Some("second")
        );
        assert!(slot.begin_fade(second));
    }
}
