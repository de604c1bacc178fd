//! Single-flight logout coordination.
//!
//! Any number of failing requests may ask for a logout; exactly one logout runs.
//! A request made while a logout is pending pushes the deadline back instead of
//! scheduling a second one.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutPhase {
    Idle,
    Pending,
    Executing,
}

/// Runs a task after a delay (browser timer, or by hand in tests)
pub trait LogoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// The actual logout side effects: clear credentials, notify, show login
pub trait LogoutHandler {
    fn logout(&self);
}

#[derive(Debug)]
struct State {
    phase: LogoutPhase,
    generation: u64,
}

pub struct LogoutCoordinator {
    state: RefCell<State>,
    scheduler: Rc<dyn LogoutScheduler>,
    handler: Rc<dyn LogoutHandler>,
    delay_ms: u32,
}

impl LogoutCoordinator {
    pub fn new(
        scheduler: Rc<dyn LogoutScheduler>,
        handler: Rc<dyn LogoutHandler>,
        delay_ms: u32,
    ) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(State {
                phase: LogoutPhase::Idle,
                generation: 0,
            }),
            scheduler,
            handler,
            delay_ms,
        })
    }

    pub fn phase(&self) -> LogoutPhase {
        self.state.borrow().phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == LogoutPhase::Idle
    }

    /// Ask for a logout. Returns false if one is already executing.
    pub fn request_logout(self: &Rc<Self>) -> bool {
        let generation = {
            let mut state = self.state.borrow_mut();
            match state.phase {
                LogoutPhase::Executing => return false,
                LogoutPhase::Idle => {
                    log::info!("Session invalid, logout scheduled in {} ms", self.delay_ms);
                }
                LogoutPhase::Pending => {
                    log::debug!("Logout already pending, rescheduling");
                }
            }
            state.phase = LogoutPhase::Pending;
            state.generation += 1;
            state.generation
        };

        let weak: Weak<Self> = Rc::downgrade(self);
        self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                if let Some(coordinator) = weak.upgrade() {
                    coordinator.fire(generation);
                }
            }),
        );
        true
    }

    /// Timer callback. Only the latest scheduled generation runs the logout.
    pub fn fire(&self, generation: u64) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.phase != LogoutPhase::Pending || state.generation != generation {
                return false;
            }
            state.phase = LogoutPhase::Executing;
        }

        self.handler.logout();

        self.state.borrow_mut().phase = LogoutPhase::Idle;
        log::info!("Logout completed");
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub struct ManualScheduler {
        pub tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    impl ManualScheduler {
        pub fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }

        /// Run every scheduled task in order
        pub fn run_all(&self) {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl LogoutScheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.tasks.borrow_mut().push((delay_ms, task));
        }
    }

    #[derive(Default)]
    pub struct CountingHandler {
        pub calls: Cell<u32>,
    }

    impl LogoutHandler for CountingHandler {
        fn logout(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn setup() -> (Rc<ManualScheduler>, Rc<CountingHandler>, Rc<LogoutCoordinator>) {
        let scheduler = Rc::new(ManualScheduler::default());
        let handler = Rc::new(CountingHandler::default());
        let coordinator = LogoutCoordinator::new(scheduler.clone(), handler.clone(), 1500);
        (scheduler, handler, coordinator)
    }

    #[test]
    fn test_single_request_runs_logout_once() {
        let (scheduler, handler, coordinator) = setup();
        assert!(coordinator.request_logout());
        assert_eq!(coordinator.phase(), LogoutPhase::Pending);
        assert_eq!(scheduler.tasks.borrow()[0].0, 1500);

        scheduler.run_all();
        assert_eq!(handler.calls.get(), 1);
        assert!(coordinator.is_idle());
    }

    #[test]
    fn test_repeated_requests_supersede_timer() {
        let (scheduler, handler, coordinator) = setup();
        coordinator.request_logout();
        coordinator.request_logout();
        coordinator.request_logout();
        assert_eq!(scheduler.pending(), 3);

        scheduler.run_all();
        assert_eq!(handler.calls.get(), 1);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let (_scheduler, handler, coordinator) = setup();
        coordinator.request_logout();
        coordinator.request_logout();
        assert!(!coordinator.fire(1));
        assert_eq!(coordinator.phase(), LogoutPhase::Pending);
        assert!(coordinator.fire(2));
        assert_eq!(handler.calls.get(), 1);
    }

    #[test]
    fn test_available_again_after_logout() {
        let (scheduler, handler, coordinator) = setup();
        coordinator.request_logout();
        scheduler.run_all();
        coordinator.request_logout();
        scheduler.run_all();
        assert_eq!(handler.calls.get(), 2);
    }

    #[test]
    fn test_fire_without_request_does_nothing() {
        let (_scheduler, handler, coordinator) = setup();
        assert!(!coordinator.fire(0));
        assert_eq!(handler.calls.get(), 0);
    }
}
