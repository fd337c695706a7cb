use crate::controllers::Controller;
use bon::Builder;
use std::f32::consts::TAU;

/// A single oscillator channel.
#[derive(Debug, Copy, Clone, PartialEq, Builder)]
pub struct Oscillator {
    #[builder(default = 0.5)]
    pub amplitude: f32,
    /// Hz
    #[builder(default = 1.0)]
    pub frequency: f32,
    /// Radians
    #[builder(default = 0.0)]
    pub phase: f32,
    #[builder(default = 0.5)]
    pub bias: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Oscillator::builder().build()
    }
}

impl Oscillator {
    pub fn sample(&self, time: f32) -> f32 {
        let raw = self.bias + self.amplitude * (TAU * self.frequency * time + self.phase).sin();
        raw.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SineController {
    channels: Vec<Oscillator>,
}

impl SineController {
    pub fn new(channels: Vec<Oscillator>) -> Self {
        SineController { channels }
    }

    /// `count` channels sharing one frequency, with phases spread evenly over a full cycle.
    pub fn travelling_wave(count: usize, frequency: f32) -> Self {
        let channels = (0..count)
            .map(|i| {
                Oscillator::builder()
                    .frequency(frequency)
                    .phase(TAU * i as f32 / count.max(1) as f32)
                    .build()
            })
            .collect();
        SineController { channels }
    }

    pub fn channels(&self) -> &[Oscillator] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut Vec<Oscillator> {
        &mut self.channels
    }
}

impl Controller for SineController {
    fn output_count(&self) -> usize {
        self.channels.len()
    }

    fn evaluate(&mut self, time: f32, outputs: &mut [f32]) {
        for (out, channel) in outputs.iter_mut().zip(&self.channels) {
            *out = channel.sample(time);
        }
    }
}
