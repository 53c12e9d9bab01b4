//! boing - closed-form spring animations for a single scalar value.
//!
//! A [`Spring`] moves a value from `from_value` to `to_value` following the
//! exact motion of a damped spring-mass system. Nothing is integrated
//! numerically: every frame evaluates the analytic solution at the elapsed
//! spring-time, so the trajectory only depends on the parameters and the
//! frame timestamps.
//!
//! Frames come from an injected [`Scheduler`] and the current time from a
//! [`Clock`]. [`ManualTimeline`] implements both with a virtual clock and
//! [`FrameLoop`] paces frames against the wall clock.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use boing::{ManualTimeline, Spring, SpringConfigUpdate, listener};
//!
//! let timeline = Rc::new(ManualTimeline::new());
//! let spring = Spring::with_timeline(
//!     SpringConfigUpdate::new().from_value(0.0).to_value(240.0).stiffness(180.0).damping(12.0),
//!     &timeline,
//! );
//!
//! spring
//!     .on_update(listener(|spring| println!("x = {:.2}", spring.current_value())))
//!     .start();
//!
//! timeline.run_at_60hz(1_000).unwrap();
//! assert_eq!(spring.current_value(), 240.0);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod listeners;
pub mod schema;
pub mod solver;
pub mod spring;
pub mod timing;

pub use config::{ConfigError, SpringConfig, SpringConfigUpdate, load_config, load_config_from_path};
pub use error::{PhysicalParameter, SpringError};
pub use listeners::{Listener, ListenerKind, listener};
pub use schema::{generate_schema, generate_schema_json};
pub use solver::{DampingRegime, SpringSample};
pub use spring::Spring;
pub use timing::{
    Clock, FrameCallback, FrameHandle, FrameLoop, ManualTimeline, Scheduler, SystemClock,
};
