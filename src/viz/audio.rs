use crate::viz::config::ResolvedWindow;
use crate::viz::error::VizError;
/// Decoded PCM recording, mono, full-scale floats.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    samples: Vec<f32>,
}
impl AudioBuffer {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Result<Self, VizError> {
        if sample_rate == 0 {
            return Err(VizError::malformed("audio sample rate must be positive"));
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
    /// Sub-range of samples covering the window. Bounds are converted with
    /// `round(time * sample_rate)` and clamped to the available samples, so a
    /// window reaching past the end of a short recording simply truncates.
    pub fn slice(&self, window: &ResolvedWindow) -> AudioBuffer {
        let lo = self.sample_index(window.start);
        let hi = self.sample_index(window.end).max(lo);
        AudioBuffer {
            sample_rate: self.sample_rate,
            samples: self.samples[lo..hi].to_vec(),
        }
    }
    fn sample_index(&self, time: f64) -> usize {
        let index = (time * self.sample_rate as f64).round();
        (index.max(0.0) as usize).min(self.samples.len())
    }
}
