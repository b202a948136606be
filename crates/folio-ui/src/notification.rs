use tracing::debug;

use folio_types::Severity;

use crate::page::Task;
use crate::scheduler::{Scheduler, TimerId};

/// How long a toast stays up before leaving on its own.
pub const AUTO_DISMISS_MS: u64 = 4000;

/// Length of the slide-out animation before the toast is gone.
pub const EXIT_ANIMATION_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Showing,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

/// At most one toast on screen at a time.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Toast>,
    next_id: u64,
    auto_dismiss: Option<TimerId>,
    removal: Option<TimerId>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Replace whatever is showing with a new toast. Returns its id.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        sched: &mut Scheduler<Task>,
    ) -> u64 {
        if let Some(old) = self.current.take() {
            debug!("Replacing toast {}", old.id);
            self.cancel_timers(sched);
        }

        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        debug!("Toast {} ({:?}): {}", id, severity, message);
        self.current = Some(Toast {
            id,
            message,
            severity,
            phase: ToastPhase::Showing,
        });
        self.auto_dismiss = Some(sched.schedule(AUTO_DISMISS_MS, Task::AutoDismissToast(id)));
        id
    }

    /// Close button. Starts the exit animation and drops the pending
    /// auto-dismiss. Returns false if `id` isn't the toast currently showing.
    pub fn dismiss(&mut self, id: u64, sched: &mut Scheduler<Task>) -> bool {
        if !self.is_showing(id) {
            return false;
        }
        if let Some(timer) = self.auto_dismiss.take() {
            sched.cancel(timer);
        }
        self.begin_exit(id, sched);
        true
    }

    pub fn on_auto_dismiss(&mut self, id: u64, sched: &mut Scheduler<Task>) {
        self.auto_dismiss = None;
        if self.is_showing(id) {
            self.begin_exit(id, sched);
        }
    }

    /// End of the exit animation. Stale ids are ignored.
    pub fn on_remove(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|t| t.id == id) {
            debug!("Toast {} removed", id);
            self.current = None;
            self.removal = None;
        }
    }

    fn is_showing(&self, id: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| t.id == id && t.phase == ToastPhase::Showing)
    }

    fn begin_exit(&mut self, id: u64, sched: &mut Scheduler<Task>) {
        if let Some(toast) = self.current.as_mut() {
            toast.phase = ToastPhase::Leaving;
        }
        self.removal = Some(sched.schedule(EXIT_ANIMATION_MS, Task::RemoveToast(id)));
    }

    fn cancel_timers(&mut self, sched: &mut Scheduler<Task>) {
        for timer in [self.auto_dismiss.take(), self.removal.take()].into_iter().flatten() {
            sched.cancel(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(n: &mut Notifier, sched: &mut Scheduler<Task>, until: u64) {
        while let Some(task) = sched.pop_due(until) {
            match task {
                Task::AutoDismissToast(id) => n.on_auto_dismiss(id, sched),
                Task::RemoveToast(id) => n.on_remove(id),
                other => panic!("unexpected task {other:?}"),
            }
        }
        sched.settle(until);
    }

    #[test]
    fn auto_dismiss_then_removal() {
        let mut sched = Scheduler::new();
        let mut n = Notifier::new();
        n.show("hello", Severity::Success, &mut sched);

        run(&mut n, &mut sched, 3999);
        assert_eq!(n.current().unwrap().phase, ToastPhase::Showing);

        run(&mut n, &mut sched, 4000);
        assert_eq!(n.current().unwrap().phase, ToastPhase::Leaving);

        run(&mut n, &mut sched, 4500);
        assert!(n.current().is_none());
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn manual_dismiss_cancels_auto_dismiss() {
        let mut sched = Scheduler::new();
        let mut n = Notifier::new();
        let id = n.show("bye", Severity::Error, &mut sched);

        run(&mut n, &mut sched, 1000);
        assert!(n.dismiss(id, &mut sched));
        assert_eq!(n.current().unwrap().phase, ToastPhase::Leaving);
        assert!(!n.dismiss(id, &mut sched));

        run(&mut n, &mut sched, 1500);
        assert!(n.current().is_none());

        // Nothing left to fire at the original auto-dismiss time.
        assert_eq!(sched.next_deadline(), None);
        run(&mut n, &mut sched, 10_000);
        assert!(n.current().is_none());
    }

    #[test]
    fn new_toast_replaces_old() {
        let mut sched = Scheduler::new();
        let mut n = Notifier::new();
        let first = n.show("one", Severity::Success, &mut sched);

        run(&mut n, &mut sched, 3000);
        let second = n.show("two", Severity::Error, &mut sched);
        assert_ne!(first, second);
        assert_eq!(n.current().unwrap().message, "two");

        // The first toast's timer would have fired at 4000.
        run(&mut n, &mut sched, 6999);
        assert_eq!(n.current().unwrap().id, second);
        assert_eq!(n.current().unwrap().phase, ToastPhase::Showing);

        run(&mut n, &mut sched, 7500);
        assert!(n.current().is_none());
    }

    #[test]
    fn stale_removal_is_ignored() {
        let mut sched = Scheduler::new();
        let mut n = Notifier::new();
        let old = n.show("old", Severity::Success, &mut sched);
        let new = n.show("new", Severity::Success, &mut sched);

        n.on_remove(old);
        assert_eq!(n.current().unwrap().id, new);
    }
}
