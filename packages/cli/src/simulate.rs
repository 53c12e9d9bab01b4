//! Runs a spring until it settles and records every frame.

use std::cell::RefCell;
use std::rc::Rc;

use boing::{
    DampingRegime, FrameLoop, ManualTimeline, Spring, SpringConfig, SpringConfigUpdate, listener,
};
use serde::Serialize;

use crate::error::CliError;

/// How frame timestamps are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Virtual clock advanced by exactly one frame duration per frame.
    Virtual,
    /// Wall clock, frames paced with sleeps.
    Realtime,
}

/// Simulation settings that are not spring parameters.
#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    pub fps: u32,
    pub max_frames: usize,
    pub pacing: Pacing,
}

/// State of the spring after one update notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub index: usize,
    /// Spring-time in milliseconds.
    pub time: f64,
    pub value: f64,
    pub velocity: f64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub config: SpringConfig,
    pub regime: DampingRegime,
    pub damping_ratio: f64,
    /// False when the frame limit was hit first.
    pub settled: bool,
    pub frames: Vec<Frame>,
}

/// Returns the duration of one frame at `fps`, in milliseconds.
fn frame_ms(fps: u32) -> f64 { 1000.0 / f64::from(fps.max(1)) }

/// Simulates `update` from start to rest.
///
/// # Errors
///
/// Returns an error if the physical parameters are invalid.
pub fn run(update: SpringConfigUpdate, options: SimulationOptions) -> Result<Trace, CliError> {
    let config = SpringConfig::from_update(&update);
    config.validate()?;

    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    let record = listener(move |spring: &Spring| {
        let mut frames = sink.borrow_mut();
        let index = frames.len();
        frames.push(Frame {
            index,
            time: spring.spring_time(),
            value: spring.current_value(),
            velocity: spring.current_velocity(),
        });
    });

    let spring = match options.pacing {
        Pacing::Virtual => {
            let timeline = Rc::new(ManualTimeline::new());
            let spring = Spring::with_timeline(update, &timeline);
            spring.on_update(record).start();
            timeline.run_until_idle(frame_ms(options.fps), options.max_frames)?;
            spring
        }
        Pacing::Realtime => {
            let frame_loop = Rc::new(FrameLoop::new(options.fps));
            let spring = Spring::with_timeline(update, &frame_loop);
            spring.on_update(record).start();
            frame_loop.run_until_idle(options.max_frames)?;
            spring
        }
    };

    let settled = !spring.is_animating();
    if !settled {
        tracing::warn!(
            max_frames = options.max_frames,
            value = spring.current_value(),
            "simulate: frame limit reached before the spring settled"
        );
        spring.stop();
    }

    let frames = frames.take();
    tracing::debug!(frames = frames.len(), settled, "simulate: run complete");

    Ok(Trace {
        config,
        regime: config.regime(),
        damping_ratio: config.damping_ratio(),
        settled,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use boing::{PhysicalParameter, SpringError};

    use super::*;

    fn virtual_options(max_frames: usize) -> SimulationOptions {
        SimulationOptions {
            fps: 60,
            max_frames,
            pacing: Pacing::Virtual,
        }
    }

    #[test]
    fn test_virtual_run_settles_on_target() {
        let update = SpringConfigUpdate::new().to_value(100.0);
        let trace = run(update, virtual_options(10_000)).unwrap();

        assert!(trace.settled);
        assert_eq!(trace.regime, DampingRegime::Underdamped);
        let last = trace.frames.last().unwrap();
        assert_eq!(last.value, 100.0);
        assert_eq!(last.velocity, 0.0);
    }

    #[test]
    fn test_frames_are_indexed_in_order() {
        let trace = run(SpringConfigUpdate::new(), virtual_options(10_000)).unwrap();

        assert!(trace.frames.len() > 2);
        assert!(trace.frames.iter().enumerate().all(|(i, frame)| frame.index == i));
        assert!(trace.frames.windows(2).all(|pair| pair[1].time >= pair[0].time));
    }

    #[test]
    fn test_frame_limit_leaves_run_unsettled() {
        let trace = run(SpringConfigUpdate::new().to_value(500.0), virtual_options(3)).unwrap();

        assert!(!trace.settled);
        assert!(trace.frames.len() <= 3);
        assert_ne!(trace.frames.last().unwrap().value, 500.0);
    }

    #[test]
    fn test_no_motion_records_nothing() {
        let update = SpringConfigUpdate::new().from_value(5.0).to_value(5.0);
        let trace = run(update, virtual_options(100)).unwrap();

        assert!(trace.settled);
        assert!(trace.frames.is_empty());
    }

    #[test]
    fn test_invalid_parameters_fail_before_running() {
        let err = run(SpringConfigUpdate::new().mass(0.0), virtual_options(100)).unwrap_err();

        assert!(matches!(
            err,
            CliError::Spring(SpringError::InvalidPhysicalParameter {
                parameter: PhysicalParameter::Mass,
                ..
            })
        ));
    }

    #[test]
    fn test_realtime_run_settles() {
        let update = SpringConfigUpdate::new().stiffness(1000.0).damping(63.3);
        let options = SimulationOptions {
            fps: 240,
            max_frames: 1_000,
            pacing: Pacing::Realtime,
        };
        let trace = run(update, options).unwrap();

        assert!(trace.settled);
        assert_eq!(trace.frames.last().unwrap().value, 1.0);
    }

    #[test]
    fn test_frame_ms() {
        assert!((frame_ms(60) - 16.666_666).abs() < 1e-3);
        assert_eq!(frame_ms(0), 1000.0);
    }
}
