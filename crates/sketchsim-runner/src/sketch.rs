//! Sketch lifecycle: `setup` once, then `loop` until told to stop.

use tracing::{debug, info};

use crate::context::SimContext;

/// What the runner does after a loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Call the loop again.
    Continue,
    /// Return from [`Runner::run`].
    Stop,
}

/// A firmware program hosted by the harness.
pub trait Sketch {
    /// Called once before the first loop iteration.
    fn setup(&mut self, ctx: &mut SimContext);

    /// Called repeatedly after `setup`.
    fn run_loop(&mut self, ctx: &mut SimContext) -> LoopControl;
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Completed loop iterations.
    pub iterations: u64,
    /// Whether the sketch asked to stop, as opposed to hitting the limit.
    pub stopped_by_sketch: bool,
    /// Clock time spent in the run, in milliseconds.
    pub elapsed_ms: u64,
}

/// Drives a [`Sketch`] against a [`SimContext`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
    max_iterations: Option<u64>,
}

impl Runner {
    /// A runner that loops until the sketch stops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after at most `iterations` loop calls.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Run `setup`, then `run_loop` until it returns [`LoopControl::Stop`] or
    /// the iteration limit is reached.
    pub fn run(&self, ctx: &mut SimContext, sketch: &mut dyn Sketch) -> RunSummary {
        let started = ctx.millis();
        info!("Starting sketch");
        sketch.setup(ctx);

        let mut iterations = 0;
        let mut stopped_by_sketch = false;
        while self.max_iterations.map_or(true, |max| iterations < max) {
            let control = sketch.run_loop(ctx);
            iterations += 1;
            debug!("Loop {} finished at {} ms", iterations, ctx.millis());
            if control == LoopControl::Stop {
                stopped_by_sketch = true;
                break;
            }
        }

        let summary = RunSummary {
            iterations,
            stopped_by_sketch,
            elapsed_ms: ctx.millis() - started,
        };
        info!(
            "Sketch finished after {} iterations ({} ms)",
            summary.iterations, summary.elapsed_ms
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::graphics::RecordingGraphics;
    use sketchsim_common::ManualClock;
    use std::sync::Arc;

    struct Countdown {
        setups: u32,
        remaining: u32,
    }

    impl Sketch for Countdown {
        fn setup(&mut self, _ctx: &mut SimContext) {
            self.setups += 1;
        }

        fn run_loop(&mut self, ctx: &mut SimContext) -> LoopControl {
            ctx.delay(10);
            self.remaining -= 1;
            if self.remaining == 0 {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        }
    }

    fn context() -> SimContext {
        SimContext::new(
            &SimConfig::default(),
            Arc::new(ManualClock::new()),
            Box::new(RecordingGraphics::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_runs_until_sketch_stops() {
        let mut ctx = context();
        let mut sketch = Countdown { setups: 0, remaining: 3 };
        let summary = Runner::new().run(&mut ctx, &mut sketch);
        assert_eq!(sketch.setups, 1);
        assert_eq!(summary.iterations, 3);
        assert!(summary.stopped_by_sketch);
        assert_eq!(summary.elapsed_ms, 30);
    }

    #[test]
    fn test_iteration_limit() {
        let mut ctx = context();
        let mut sketch = Countdown { setups: 0, remaining: 100 };
        let summary = Runner::new().with_iterations(5).run(&mut ctx, &mut sketch);
        assert_eq!(summary.iterations, 5);
        assert!(!summary.stopped_by_sketch);
        assert_eq!(sketch.remaining, 95);
    }

    #[test]
    fn test_zero_iterations_still_runs_setup() {
        let mut ctx = context();
        let mut sketch = Countdown { setups: 0, remaining: 1 };
        let summary = Runner::new().with_iterations(0).run(&mut ctx, &mut sketch);
        assert_eq!(sketch.setups, 1);
        assert_eq!(summary.iterations, 0);
    }
}
