//! Signal sources that drive [`Effector`](crate::components::Effector)s.
//!
//! The evolved controllers of a full creature pipeline plug in through [`Controller`].
//! [`SineController`] is a plain open-loop oscillator bank, good for demos and tests.

pub mod sine;

pub use sine::*;

/// Produces normalized signals in `[0, 1]`, one per output.
pub trait Controller {
    fn output_count(&self) -> usize;

    /// Writes the signals for `time` (in seconds) into `outputs`.
    ///
    /// `outputs` is at least [`Controller::output_count`] long.
    fn evaluate(&mut self, time: f32, outputs: &mut [f32]);
}
