//! Publish/subscribe notifications for hires and terminations.
//!
//! The [`LifecycleNotifier`] is owned by the [`Directory`](crate::Directory)
//! and driven by its mutations. Listeners never see the directory itself,
//! only the employee affected by the event.

use std::fmt;

use tracing::instrument;

use crate::domain::Employee;

/// Built-in listeners.
pub mod listeners;

/// Something that reacts to employees joining or leaving.
pub trait LifecycleListener {
    /// A short name used in logs and error reports.
    fn name(&self) -> &str;

    /// Called after an employee has been added to the directory.
    ///
    /// # Errors
    ///
    /// Implementations return an error if they could not process the event.
    /// The error is reported but does not undo the hire.
    fn on_hire(&mut self, employee: &Employee) -> Result<(), ListenerError>;

    /// Called after an employee has been removed from the directory.
    ///
    /// # Errors
    ///
    /// Implementations return an error if they could not process the event.
    /// The error is reported but does not undo the termination.
    fn on_terminate(&mut self, employee: &Employee) -> Result<(), ListenerError>;
}

/// Handle returned by [`LifecycleNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

/// The two lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// An employee was added.
    Hire,
    /// An employee was removed.
    Termination,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hire => f.write_str("hire"),
            Self::Termination => f.write_str("termination"),
        }
    }
}

/// A listener failed to handle an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("listener '{listener}' failed: {message}")]
pub struct ListenerError {
    /// Name of the listener that failed.
    pub listener: String,
    /// What went wrong.
    pub message: String,
}

impl ListenerError {
    /// Creates a new listener error.
    #[must_use]
    pub fn new(listener: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            listener: listener.into(),
            message: message.to_string(),
        }
    }
}

/// Result of delivering one event to every subscribed listener.
///
/// Listener failures are isolated: every listener is invoked even if an
/// earlier one failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct DispatchReport {
    /// Number of listeners the event was delivered to.
    pub delivered: usize,
    /// Failures reported by listeners, in subscription order.
    pub failures: Vec<ListenerError>,
}

impl DispatchReport {
    /// Whether every listener handled the event.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// An ordered collection of lifecycle listeners.
#[derive(Default)]
pub struct LifecycleNotifier {
    listeners: Vec<(ListenerId, Box<dyn LifecycleListener>)>,
    next_id: usize,
}

impl fmt::Debug for LifecycleNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(id, l)| (id, l.name())))
            .finish()
    }
}

impl LifecycleNotifier {
    /// Adds a listener. It will be invoked after all previously subscribed
    /// listeners.
    pub fn subscribe(&mut self, listener: impl LifecycleListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        tracing::debug!("Subscribed listener '{}'", listener.name());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `true` if the listener was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let Some(position) = self.listeners.iter().position(|(known, _)| *known == id) else {
            return false;
        };
        let (_, listener) = self.listeners.remove(position);
        tracing::debug!("Unsubscribed listener '{}'", listener.name());
        true
    }

    /// The number of subscribed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Names of the subscribed listeners, in subscription order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.listeners.iter().map(|(_, listener)| listener.name())
    }

    /// Tells every listener that an employee was hired.
    pub fn notify_hire(&mut self, employee: &Employee) -> DispatchReport {
        self.dispatch(LifecycleEvent::Hire, employee)
    }

    /// Tells every listener that an employee was terminated.
    pub fn notify_termination(&mut self, employee: &Employee) -> DispatchReport {
        self.dispatch(LifecycleEvent::Termination, employee)
    }

    #[instrument(skip(self, employee), fields(employee = %employee.id()))]
    fn dispatch(&mut self, event: LifecycleEvent, employee: &Employee) -> DispatchReport {
        let mut report = DispatchReport::default();

        for (_, listener) in &mut self.listeners {
            let outcome = match event {
                LifecycleEvent::Hire => listener.on_hire(employee),
                LifecycleEvent::Termination => listener.on_terminate(employee),
            };
            report.delivered += 1;

            if let Err(error) = outcome {
                tracing::warn!("{event} notification for {} failed: {error}", employee.id());
                report.failures.push(error);
            }
        }

        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::domain::{Department, NewEmployee, Role};

    /// Records every event it sees into a shared log.
    pub(crate) struct Recorder {
        pub(crate) name: &'static str,
        pub(crate) log: Rc<RefCell<Vec<String>>>,
        pub(crate) fail: bool,
    }

    impl Recorder {
        pub(crate) fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                fail: false,
            }
        }

        fn record(&self, event: &str, employee: &Employee) -> Result<(), ListenerError> {
            self.log
                .borrow_mut()
                .push(format!("{}:{event}:{}", self.name, employee.id()));
            if self.fail {
                Err(ListenerError::new(self.name, "boom"))
            } else {
                Ok(())
            }
        }
    }

    impl LifecycleListener for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn on_hire(&mut self, employee: &Employee) -> Result<(), ListenerError> {
            self.record("hire", employee)
        }

        fn on_terminate(&mut self, employee: &Employee) -> Result<(), ListenerError> {
            self.record("terminate", employee)
        }
    }

    fn employee(id: &str) -> Employee {
        NewEmployee::new(id, "Test", "Person", Department::new("Sales", "SALES-001"), Role::Developer)
            .salaried(1_000.0)
            .unwrap()
    }

    #[test]
    fn notifies_listeners_in_subscription_order() {
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut notifier = LifecycleNotifier::default();
        notifier.subscribe(Recorder::new("it", &log));
        notifier.subscribe(Recorder::new("payroll", &log));

        let report = notifier.notify_hire(&employee("E001"));
        let report2 = notifier.notify_termination(&employee("E001"));

        assert_eq!(report.delivered, 2);
        assert!(report.is_clean());
        assert!(report2.is_clean());
        assert_eq!(
            *log.borrow(),
            [
                "it:hire:E001",
                "payroll:hire:E001",
                "it:terminate:E001",
                "payroll:terminate:E001"
            ]
        );
    }

    #[test]
    fn unsubscribed_listener_is_not_notified() {
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut notifier = LifecycleNotifier::default();
        let it = notifier.subscribe(Recorder::new("it", &log));
        notifier.subscribe(Recorder::new("payroll", &log));

        assert!(notifier.unsubscribe(it));
        assert!(!notifier.unsubscribe(it));
        let _ = notifier.notify_hire(&employee("E002"));

        assert_eq!(*log.borrow(), ["payroll:hire:E002"]);
        assert_eq!(notifier.names().collect::<Vec<_>>(), ["payroll"]);
    }

    #[test]
    fn failing_listener_does_not_stop_dispatch() {
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut notifier = LifecycleNotifier::default();
        let mut failing = Recorder::new("flaky", &log);
        failing.fail = true;
        notifier.subscribe(failing);
        notifier.subscribe(Recorder::new("payroll", &log));

        let report = notifier.notify_hire(&employee("E003"));

        assert_eq!(report.delivered, 2);
        assert_eq!(report.failures, [ListenerError::new("flaky", "boom")]);
        assert_eq!(*log.borrow(), ["flaky:hire:E003", "payroll:hire:E003"]);
    }
}
