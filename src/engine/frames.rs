use crate::browser::{self, LoopClosure};
use anyhow::{anyhow, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type SharedLoopClosure = Rc<RefCell<Option<LoopClosure>>>;

/// Anything that can hand out and revoke frame callbacks
pub trait FrameScheduler {
    fn request(&self) -> Result<i32>;
    fn cancel(&self, handle: i32) -> Result<()>;
}

/// requestAnimationFrame with the loop's own closure
pub struct AnimationFrames {
    frame: SharedLoopClosure,
}

impl AnimationFrames {
    pub fn new(frame: SharedLoopClosure) -> Self {
        AnimationFrames { frame }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request(&self) -> Result<i32> {
        let frame = self.frame.borrow();
        let closure = frame
            .as_ref()
            .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?;
        browser::request_animation_frame(closure)
    }

    fn cancel(&self, handle: i32) -> Result<()> {
        browser::cancel_animation_frame(handle)
    }
}

/// Tracks the one frame request that may be pending at any time
pub struct FrameDriver<S> {
    scheduler: S,
    pending: Cell<Option<i32>>,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        FrameDriver {
            scheduler,
            pending: Cell::new(None),
        }
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending.get()
    }

    /// Requests the next frame unless one is already on its way
    pub fn schedule(&self) -> Result<()> {
        if self.pending.get().is_none() {
            self.pending.set(Some(self.scheduler.request()?));
        }
        Ok(())
    }

    /// The request that invoked the current tick is used up
    pub fn fired(&self) {
        self.pending.set(None);
    }

    /// Cancels the pending request, then runs `rebuild`. No frame can reach
    /// the state being discarded.
    pub fn restart(&self, rebuild: impl FnOnce()) {
        if let Some(handle) = self.pending.take() {
            if let Err(err) = self.scheduler.cancel(handle) {
                log::warn!("GameLoop: {:#?}", err);
            }
        }
        rebuild();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Request(i32),
        Cancel(i32),
        Reset,
    }

    #[derive(Default)]
    struct RecordingScheduler {
        calls: Rc<RefCell<Vec<Call>>>,
        next: Cell<i32>,
    }

    impl FrameScheduler for RecordingScheduler {
        fn request(&self) -> Result<i32> {
            let handle = self.next.get() + 1;
            self.next.set(handle);
            self.calls.borrow_mut().push(Call::Request(handle));
            Ok(handle)
        }

        fn cancel(&self, handle: i32) -> Result<()> {
            self.calls.borrow_mut().push(Call::Cancel(handle));
            Ok(())
        }
    }

    fn driver() -> (FrameDriver<RecordingScheduler>, Rc<RefCell<Vec<Call>>>) {
        let scheduler = RecordingScheduler::default();
        let calls = scheduler.calls.clone();
        (FrameDriver::new(scheduler), calls)
    }

    #[test]
    fn restart_cancels_the_pending_frame_before_reset() {
        let (frames, calls) = driver();
        frames.schedule().unwrap();
        assert_eq!(frames.pending(), Some(1));

        frames.restart(|| calls.borrow_mut().push(Call::Reset));

        assert_eq!(frames.pending(), None);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Request(1), Call::Cancel(1), Call::Reset]
        );
    }

    #[test]
    fn restart_after_the_frame_fired_has_nothing_to_cancel() {
        let (frames, calls) = driver();
        frames.schedule().unwrap();
        frames.fired();

        frames.restart(|| calls.borrow_mut().push(Call::Reset));

        assert_eq!(*calls.borrow(), vec![Call::Request(1), Call::Reset]);
    }

    #[test]
    fn only_one_frame_is_ever_pending() {
        let (frames, calls) = driver();
        frames.schedule().unwrap();
        frames.schedule().unwrap();
        assert_eq!(*calls.borrow(), vec![Call::Request(1)]);

        frames.fired();
        frames.schedule().unwrap();
        assert_eq!(frames.pending(), Some(2));
    }
}
