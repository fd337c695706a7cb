use crate::core::SegmentId;
use snafu::Snafu;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum EffectorError {
    #[snafu(display("Effector: Expected {expected} input signals, got {got}"))]
    NotEnoughInputs { expected: usize, got: usize },
    #[snafu(display("Effector: Segment {id:?} doesn't exist"))]
    UnknownEffector { id: SegmentId },
}

/// Anything that is driven by a fixed number of normalized controller signals.
///
/// Signals are expected in `[0, 1]`. Implementations clamp anything outside that range.
pub trait Effector {
    /// Number of signals consumed per [`Effector::affect`] call
    fn input_count(&self) -> usize;

    /// Applies the first [`Effector::input_count`] signals of `inputs`.
    fn affect(&mut self, inputs: &[f32], dt: f32) -> Result<(), EffectorError>;
}
