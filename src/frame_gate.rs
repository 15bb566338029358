use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};

/// Something that runs a task once, later, on the main thread.
pub trait FrameScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>);
}

/// Schedules on the next animation frame.
#[derive(Default)]
pub struct RafScheduler {
    // Dropping an AnimationFrame cancels it, so the latest one is held here.
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameScheduler for RafScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>) {
        let handle = request_animation_frame(move |_timestamp| task());
        *self.pending.borrow_mut() = Some(handle);
    }
}

/// Single-slot "latest pending update" cell.
///
/// Bursts of offers between two frames collapse into one drain that sees only
/// the most recent value. Once scheduled, a drain always runs.
pub struct FrameGate<T, S = RafScheduler> {
    slot: Rc<RefCell<Option<T>>>,
    pending: Rc<Cell<bool>>,
    scheduler: S,
    work: Rc<dyn Fn(T)>,
}

impl<T: 'static, S: FrameScheduler> FrameGate<T, S> {
    pub fn new(scheduler: S, work: impl Fn(T) + 'static) -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(false)),
            scheduler,
            work: Rc::new(work),
        }
    }

    /// Stores `value` and schedules a drain unless one is already pending.
    /// Returns whether this offer scheduled the drain.
    pub fn offer(&self, value: T) -> bool {
        *self.slot.borrow_mut() = Some(value);
        if self.pending.get() {
            return false;
        }
        self.pending.set(true);

        let slot = self.slot.clone();
        let pending = self.pending.clone();
        let work = self.work.clone();
        self.scheduler.schedule(Box::new(move || {
            let latest = slot.borrow_mut().take();
            if let Some(value) = latest {
                work(value);
            }
            pending.set(false);
        }));
        true
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Holds scheduled tasks until the test runs them.
    #[derive(Clone, Default)]
    pub(crate) struct ManualScheduler {
        tasks: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
    }

    impl ManualScheduler {
        pub(crate) fn queued(&self) -> usize {
            self.tasks.borrow().len()
        }

        pub(crate) fn run_frame(&self) {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            for task in tasks {
                task();
            }
        }
    }

    impl FrameScheduler for ManualScheduler {
        fn schedule(&self, task: Box<dyn FnOnce()>) {
            self.tasks.borrow_mut().push(task);
        }
    }

    type RecordingGate = (
        FrameGate<u32, ManualScheduler>,
        ManualScheduler,
        Rc<RefCell<Vec<u32>>>,
    );

    fn recording_gate() -> RecordingGate {
        let scheduler = ManualScheduler::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let gate = FrameGate::new(scheduler.clone(), move |v| sink.borrow_mut().push(v));
        (gate, scheduler, seen)
    }

    #[test]
    fn burst_collapses_to_latest_value() {
        let (gate, scheduler, seen) = recording_gate();
        assert!(gate.offer(1));
        assert!(!gate.offer(2));
        assert!(!gate.offer(3));
        assert_eq!(scheduler.queued(), 1);

        scheduler.run_frame();
        assert_eq!(*seen.borrow(), vec![3]);
        assert!(!gate.is_pending());
    }

    #[test]
    fn next_offer_after_drain_schedules_again() {
        let (gate, scheduler, seen) = recording_gate();
        gate.offer(1);
        scheduler.run_frame();
        assert!(gate.offer(7));
        assert!(gate.is_pending());
        scheduler.run_frame();
        assert_eq!(*seen.borrow(), vec![1, 7]);
    }

    #[test]
    fn nothing_runs_without_an_offer() {
        let (_gate, scheduler, seen) = recording_gate();
        scheduler.run_frame();
        assert!(seen.borrow().is_empty());
    }
}
