//! Fixed-rate gesture tick loop
//!
//! Drives [`ManipulationController::tick`] from a repeating calloop timer.
//! Hosts that already own an event loop can call `tick` themselves instead.

use crate::controller::ManipulationController;
use crate::error::Result;
use crate::sensor::PositionProvider;
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};
use std::sync::Arc;
use std::time::Duration;

struct LoopState {
    controller: Arc<ManipulationController>,
    provider: Arc<dyn PositionProvider>,
    ticks: u64,
    max_ticks: Option<u64>,
    signal: LoopSignal,
}

/// Timer-driven tick loop for one controller and provider
pub struct GestureLoop {
    event_loop: EventLoop<'static, LoopState>,
    state: LoopState,
}

impl GestureLoop {
    /// Create a loop ticking at the controller's configured interval
    pub fn new(
        controller: Arc<ManipulationController>,
        provider: Arc<dyn PositionProvider>,
    ) -> Result<Self> {
        let event_loop: EventLoop<'static, LoopState> = EventLoop::try_new()?;
        let interval = Duration::from_millis(controller.config().tick_interval_ms);

        event_loop
            .handle()
            .insert_source(
                Timer::from_duration(interval),
                move |_deadline, _: &mut (), state: &mut LoopState| {
                    state.controller.tick(state.provider.as_ref());
                    state.ticks += 1;

                    if state.max_ticks.is_some_and(|max| state.ticks >= max) {
                        state.signal.stop();
                        return TimeoutAction::Drop;
                    }
                    TimeoutAction::ToDuration(interval)
                },
            )
            .map_err(|e| e.error)?;

        let state = LoopState {
            controller,
            provider,
            ticks: 0,
            max_ticks: None,
            signal: event_loop.get_signal(),
        };

        Ok(Self { event_loop, state })
    }

    /// Stop after `ticks` ticks
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.state.max_ticks = Some(ticks);
        self
    }

    /// Handle that stops [`run`](Self::run) from another thread
    pub fn signal(&self) -> LoopSignal {
        self.event_loop.get_signal()
    }

    /// Ticks executed so far
    pub fn ticks(&self) -> u64 {
        self.state.ticks
    }

    /// Run until stopped by the signal or the tick limit. Returns the tick count.
    pub fn run(&mut self) -> Result<u64> {
        log::debug!(
            "Gesture loop running every {} ms",
            self.state.controller.config().tick_interval_ms
        );
        self.event_loop.run(None::<Duration>, &mut self.state, |_| {})?;
        log::debug!("Gesture loop stopped after {} ticks", self.state.ticks);
        Ok(self.state.ticks)
    }

    /// Dispatch pending timer events once, waiting at most `timeout`
    pub fn dispatch(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.event_loop.dispatch(timeout, &mut self.state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GestureConfig;
    use crate::sensor::SharedSkeleton;

    #[test]
    fn test_runs_until_tick_limit() {
        let controller = Arc::new(ManipulationController::new(
            GestureConfig::default().with_tick_interval_ms(1),
        ));
        let provider: Arc<dyn PositionProvider> = Arc::new(SharedSkeleton::new());

        let mut gesture_loop = GestureLoop::new(controller, provider)
            .unwrap()
            .with_tick_limit(3);
        assert_eq!(gesture_loop.run().unwrap(), 3);
        assert_eq!(gesture_loop.ticks(), 3);
    }

    #[test]
    fn test_signal_stops_unbounded_run() {
        let controller = Arc::new(ManipulationController::new(
            GestureConfig::default().with_tick_interval_ms(1),
        ));
        let provider: Arc<dyn PositionProvider> = Arc::new(SharedSkeleton::new());

        let mut gesture_loop = GestureLoop::new(controller, provider).unwrap();
        let signal = gesture_loop.signal();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            signal.stop();
            signal.wakeup();
        });

        let ticks = gesture_loop.run().unwrap();
        stopper.join().unwrap();
        assert!(ticks > 0);
        assert_eq!(gesture_loop.ticks(), ticks);
    }

    #[test]
    fn test_dispatch_runs_pending_ticks() {
        let controller = Arc::new(ManipulationController::new(
            GestureConfig::default().with_tick_interval_ms(1),
        ));
        let provider: Arc<dyn PositionProvider> = Arc::new(SharedSkeleton::new());

        let mut gesture_loop = GestureLoop::new(controller, provider).unwrap();
        assert_eq!(gesture_loop.ticks(), 0);
        for _ in 0..100 {
            gesture_loop.dispatch(Some(Duration::from_millis(50))).unwrap();
            if gesture_loop.ticks() > 0 {
                break;
            }
        }
        assert!(gesture_loop.ticks() > 0);
    }
}
