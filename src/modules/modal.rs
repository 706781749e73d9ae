//! Confirmation modal gating emergency commands.

use chrono::{DateTime, Utc};

/// Emergency commands that can be issued against the selected drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyAction {
    ReturnHome,
    EmergencyLand,
    ResumeMission,
}

impl EmergencyAction {
    pub const ALL: [EmergencyAction; 3] = [
        EmergencyAction::ReturnHome,
        EmergencyAction::EmergencyLand,
        EmergencyAction::ResumeMission,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            EmergencyAction::ReturnHome => "Return Home",
            EmergencyAction::EmergencyLand => "Emergency Land",
            EmergencyAction::ResumeMission => "Resume Mission",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            EmergencyAction::ReturnHome => Severity::Primary,
            EmergencyAction::EmergencyLand => Severity::Danger,
            EmergencyAction::ResumeMission => Severity::Success,
        }
    }
}

/// Severity class of an action, driving the modal's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
    Success,
    Primary,
}

/// Record of a confirmed command. Real dispatch is an external
/// collaborator; this log is the observable side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub action: EmergencyAction,
    pub target_id: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Shown {
        action: EmergencyAction,
        target_id: String,
    },
}

/// Two-state machine: Hidden, or Shown with exactly one pending
/// action/target pair. A new trigger while shown overwrites the
/// pending pair; there is no queue.
#[derive(Debug, Clone, Default)]
pub struct ActionModal {
    state: ModalState,
}

impl ActionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, ModalState::Shown { .. })
    }

    pub fn open(&mut self, action: EmergencyAction, target_id: String) {
        self.state = ModalState::Shown { action, target_id };
    }

    /// Cancel key or backdrop click: close without emitting a record.
    pub fn cancel(&mut self) {
        self.state = ModalState::Hidden;
    }

    /// Confirm: emit the command record and close. Returns `None` when
    /// nothing was pending.
    pub fn confirm(&mut self) -> Option<CommandRecord> {
        match std::mem::take(&mut self.state) {
            ModalState::Hidden => None,
            ModalState::Shown { action, target_id } => Some(CommandRecord {
                action,
                target_id,
                at: Utc::now(),
            }),
        }
    }

    pub fn title(&self) -> Option<String> {
        match &self.state {
            ModalState::Hidden => None,
            ModalState::Shown { action, .. } => Some(format!("Confirm: {}", action.title())),
        }
    }

    pub fn message(&self) -> Option<String> {
        match &self.state {
            ModalState::Hidden => None,
            ModalState::Shown { action, target_id } => Some(format!(
                "Initiate \"{}\" for drone {}?",
                action.title(),
                target_id
            )),
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match &self.state {
            ModalState::Hidden => None,
            ModalState::Shown { action, .. } => Some(action.severity()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_emits_record_and_hides() {
        let mut modal = ActionModal::new();
        modal.open(EmergencyAction::EmergencyLand, "DR-1".to_string());
        let record = modal.confirm().unwrap();
        assert_eq!(record.action, EmergencyAction::EmergencyLand);
        assert_eq!(record.target_id, "DR-1");
        assert!(!modal.is_shown());
    }

    #[test]
    fn cancel_emits_nothing() {
        let mut modal = ActionModal::new();
        modal.open(EmergencyAction::ReturnHome, "DR-2".to_string());
        modal.cancel();
        assert!(!modal.is_shown());
        assert_eq!(modal.confirm(), None);
    }

    #[test]
    fn new_trigger_overwrites_pending_action() {
        let mut modal = ActionModal::new();
        modal.open(EmergencyAction::ReturnHome, "DR-1".to_string());
        modal.open(EmergencyAction::ResumeMission, "DR-3".to_string());
        let record = modal.confirm().unwrap();
        assert_eq!(record.action, EmergencyAction::ResumeMission);
        assert_eq!(record.target_id, "DR-3");
    }

    #[test]
    fn severity_classes() {
        assert_eq!(EmergencyAction::EmergencyLand.severity(), Severity::Danger);
        assert_eq!(EmergencyAction::ResumeMission.severity(), Severity::Success);
        assert_eq!(EmergencyAction::ReturnHome.severity(), Severity::Primary);
    }
}
