//! # sketchsim-runner
//!
//! Hosts a firmware sketch on the simulated radio and HTTP bridge.
//!
//! A run is built from a [`SimConfig`] (usually loaded from YAML), which
//! yields one [`SimContext`] for the whole process. The [`Runner`] calls the
//! sketch's `setup` once and its loop until the sketch stops or the iteration
//! limit is reached.
//!
//! ## Usage
//!
//! ```no_run
//! use sketchsim_runner::{load_config_from_str, FetchSketch, Runner, SimContext};
//!
//! let config = load_config_from_str("sketch: { url: http://example.test/data }")?;
//! let mut ctx = SimContext::from_config(&config)?;
//! let mut sketch = FetchSketch::new(config.sketch.clone());
//! let summary = Runner::new().with_iterations(3).run(&mut ctx, &mut sketch);
//! println!("ran {} iterations", summary.iterations);
//! # Ok::<(), sketchsim_runner::ConfigError>(())
//! ```

pub mod config;
pub mod context;
pub mod demo;
pub mod graphics;
pub mod sketch;

pub use config::{load_config, load_config_from_str, ConfigError, SimConfig, SketchConfig};
pub use context::SimContext;
pub use demo::FetchSketch;
pub use graphics::{
    AnimatedProperty, Animation, Graphics, GraphicsCall, Property, RecordingGraphics, ShapeId, ShapeKind,
};
pub use sketch::{LoopControl, RunSummary, Runner, Sketch};
