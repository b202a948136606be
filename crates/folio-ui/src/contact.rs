use std::collections::VecDeque;

use tracing::{debug, info};

use folio_types::{ContactForm, ContactMessage, Severity, ValidationError};

use crate::notification::Notifier;
use crate::page::Task;
use crate::scheduler::{Scheduler, TimerId};

/// Delay before a simulated submission reports success.
pub const SIMULATED_DELAY_MS: u64 = 2000;

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_TOAST: &str = "Message sent successfully! 🎉";

/// Where an accepted submission goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Wait, then report success. Nothing leaves the page.
    #[default]
    Simulated,
    /// Hand the message to the driver, which posts it to the endpoint.
    Remote,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Sending,
}

impl SubmitState {
    pub fn label(self) -> &'static str {
        match self {
            SubmitState::Idle => SEND_LABEL,
            SubmitState::Sending => SENDING_LABEL,
        }
    }

    pub fn disabled(self) -> bool {
        self == SubmitState::Sending
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Scheduled(TimerId),
    Deliver(ContactMessage),
}

/// The contact form and its submit button.
///
/// Submissions are not deduplicated: each accepted submit gets its own
/// completion, and every completion restores the button.
#[derive(Debug, Default)]
pub struct ContactFormWidget {
    pub fields: ContactForm,
    state: SubmitState,
    mode: SubmissionMode,
    pending: VecDeque<TimerId>,
}

impl ContactFormWidget {
    pub fn new(mode: SubmissionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// Whether a simulated completion is still waiting on the scheduler.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn submit(&mut self, sched: &mut Scheduler<Task>, notifier: &mut Notifier) -> SubmitOutcome {
        let message = match self.fields.validate() {
            Ok(message) => message,
            Err(e) => {
                debug!("Contact form rejected: {}", e);
                notifier.show(e.to_string(), Severity::Error, sched);
                return SubmitOutcome::Rejected(e);
            }
        };

        self.state = SubmitState::Sending;

        match self.mode {
            SubmissionMode::Simulated => {
                let timer = sched.schedule(SIMULATED_DELAY_MS, Task::FinishSimulatedSubmission);
                self.pending.push_back(timer);
                SubmitOutcome::Scheduled(timer)
            }
            SubmissionMode::Remote => SubmitOutcome::Deliver(message),
        }
    }

    pub fn on_simulated_finish(&mut self, sched: &mut Scheduler<Task>, notifier: &mut Notifier) {
        self.pending.pop_front();
        self.complete(Ok(()), sched, notifier);
    }

    /// Settle a submission. On failure the fields are kept so the sender
    /// can retry.
    pub fn complete(
        &mut self,
        result: Result<(), String>,
        sched: &mut Scheduler<Task>,
        notifier: &mut Notifier,
    ) {
        match result {
            Ok(()) => {
                info!("Contact message sent");
                notifier.show(SENT_TOAST, Severity::Success, sched);
                self.fields.clear();
            }
            Err(reason) => {
                info!("Contact message failed: {}", reason);
                notifier.show(reason, Severity::Error, sched);
            }
        }
        self.state = SubmitState::Idle;
    }

    /// Drop pending simulated completions, e.g. when leaving the page.
    /// Returns how many were cancelled.
    pub fn abandon(&mut self, sched: &mut Scheduler<Task>) -> usize {
        let cancelled = self.pending.drain(..).filter(|t| sched.cancel(*t)).count();
        self.state = SubmitState::Idle;
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::ToastPhase;

    fn alice() -> ContactForm {
        ContactForm::new("Alice", "alice@example.com", "Hi", "Hello")
    }

    #[test]
    fn empty_field_shows_error_and_stays_idle() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Simulated);
        form.fields = ContactForm::new("Alice", "alice@example.com", "", "Hello");

        let outcome = form.submit(&mut sched, &mut notifier);

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingField));
        assert_eq!(form.state(), SubmitState::Idle);
        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "Please fill in all fields");
        assert_eq!(toast.severity, Severity::Error);
        // Only the toast timer is pending, no completion.
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn invalid_email_message() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Remote);
        form.fields = ContactForm::new("Alice", "not-an-email", "Hi", "Hello");

        let outcome = form.submit(&mut sched, &mut notifier);

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidEmail));
        assert_eq!(notifier.current().unwrap().message, "Please enter a valid email");
    }

    #[test]
    fn simulated_submission_completes_after_delay() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Simulated);
        form.fields = alice();
        assert_eq!(form.mode(), SubmissionMode::Simulated);

        let SubmitOutcome::Scheduled(timer) = form.submit(&mut sched, &mut notifier) else {
            panic!("expected a scheduled completion");
        };
        assert_eq!(form.state(), SubmitState::Sending);
        assert_eq!(form.state().label(), "Sending...");
        assert!(form.state().disabled());
        assert!(notifier.current().is_none());

        assert_eq!(sched.pop_due(1999), None);
        assert_eq!(sched.pop_due(2000), Some(Task::FinishSimulatedSubmission));
        assert!(!sched.is_pending(timer));
        assert!(form.has_pending());
        form.on_simulated_finish(&mut sched, &mut notifier);

        assert_eq!(form.state(), SubmitState::Idle);
        assert_eq!(form.state().label(), "Send Message");
        assert_eq!(form.fields, ContactForm::default());
        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "Message sent successfully! 🎉");
        assert_eq!(toast.phase, ToastPhase::Showing);
    }

    #[test]
    fn each_submit_gets_its_own_completion() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Simulated);
        form.fields = alice();

        form.submit(&mut sched, &mut notifier);
        sched.settle(500);
        form.submit(&mut sched, &mut notifier);

        assert_eq!(sched.pop_due(2000), Some(Task::FinishSimulatedSubmission));
        form.on_simulated_finish(&mut sched, &mut notifier);
        assert_eq!(form.state(), SubmitState::Idle);
        assert_eq!(form.fields, ContactForm::default());
        assert!(form.has_pending());
        let first = notifier.current().unwrap().id;

        assert_eq!(sched.pop_due(2499), None);
        assert_eq!(sched.pop_due(2500), Some(Task::FinishSimulatedSubmission));
        form.on_simulated_finish(&mut sched, &mut notifier);
        let second = notifier.current().unwrap();
        assert_ne!(second.id, first);
        assert_eq!(second.message, SENT_TOAST);
        assert!(!form.has_pending());
    }

    #[test]
    fn remote_failure_keeps_fields() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Remote);
        form.fields = alice();
        assert_eq!(form.mode(), SubmissionMode::Remote);

        let outcome = form.submit(&mut sched, &mut notifier);
        assert!(!form.has_pending());
        assert!(matches!(outcome, SubmitOutcome::Deliver(ref m) if m.name == "Alice"));
        assert_eq!(sched.pending_count(), 0);

        form.complete(Err("Connection Failed: boom".into()), &mut sched, &mut notifier);

        assert_eq!(form.state(), SubmitState::Idle);
        assert_eq!(form.fields, alice());
        assert_eq!(notifier.current().unwrap().severity, Severity::Error);
        assert_eq!(notifier.current().unwrap().message, "Connection Failed: boom");
    }

    #[test]
    fn abandon_cancels_pending_completions() {
        let mut sched = Scheduler::new();
        let mut notifier = Notifier::new();
        let mut form = ContactFormWidget::new(SubmissionMode::Simulated);
        form.fields = alice();

        form.submit(&mut sched, &mut notifier);
        form.submit(&mut sched, &mut notifier);

        assert_eq!(form.abandon(&mut sched), 2);
        assert_eq!(form.state(), SubmitState::Idle);
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(form.fields, alice());
    }
}
