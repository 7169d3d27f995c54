use ndarray::Array2;
use rustfft::{num_complex::Complex32, FftPlanner};
use crate::viz::audio::AudioBuffer;
// Power below this renders as a uniform floor instead of -inf dB.
const POWER_FLOOR: f32 = 1e-12;
/// STFT framing parameters. Defaults give a 512-sample hop, around 12 ms at
/// typical speech sample rates.
#[derive(Clone, Copy, Debug)]
pub struct SpectrogramParams {
    pub window_size: usize,
    pub overlap: usize,
    pub fft_size: usize,
}
impl Default for SpectrogramParams {
    fn default() -> Self {
        Self {
            window_size: 2048,
            overlap: 1536,
            fft_size: 2048,
        }
    }
}
impl SpectrogramParams {
    /// Samples between consecutive frame starts. Overlap is capped below the
    /// window size so the hop stays positive.
    pub fn hop(&self) -> usize {
        self.window_size - self.overlap.min(self.window_size - 1)
    }
    fn padded_fft_size(&self) -> usize {
        self.fft_size.max(self.window_size)
    }
}
/// Time-frequency log-power grid. `times_s` are frame centers relative to the
/// start of the analyzed slice; the caller shifts them onto the absolute
/// recording timeline.
#[derive(Clone, Debug)]
pub struct Spectrogram {
    pub frequencies_hz: Vec<f32>,
    pub times_s: Vec<f64>,
    /// Shape: (frequency bins, frames), in dB.
    pub power_db: Array2<f32>,
}
impl Spectrogram {
    pub fn frames(&self) -> usize {
        self.times_s.len()
    }
    pub fn nyquist_hz(&self) -> f32 {
        self.frequencies_hz.last().copied().unwrap_or(0.0)
    }
}
/// Helper that computes Hann-window spectrograms for fixed parameters.
pub struct SpectrogramComputer {
    params: SpectrogramParams,
}
impl SpectrogramComputer {
    pub fn with_params(params: SpectrogramParams) -> Self {
        Self { params }
    }
    pub fn compute(&self, audio: &AudioBuffer) -> Spectrogram {
        let window_size = self.params.window_size;
        let hop = self.params.hop();
        let fft_size = self.params.padded_fft_size();
        let sample_rate = audio.sample_rate() as f32;
        let samples = audio.samples();
        let bins = fft_size / 2 + 1;
        // A slice shorter than one analysis window still yields one padded
        // frame; only empty audio yields none.
        let frames = if samples.is_empty() {
            0
        } else if samples.len() < window_size {
            1
        } else {
            (samples.len() - window_size) / hop + 1
        };
        let frequencies_hz: Vec<f32> = (0..bins)
            .map(|k| k as f32 * sample_rate / fft_size as f32)
            .collect();
        let times_s: Vec<f64> = (0..frames)
            .map(|k| (window_size as f64 / 2.0 + (k * hop) as f64) / sample_rate as f64)
            .collect();
        let hann: Vec<f32> = (0..window_size)
            .map(|i| 0.5 - 0.5 * (std::f32::consts::TAU * i as f32 / window_size as f32).cos())
            .collect();
        let window_power: f32 = hann.iter().map(|w| w * w).sum();
        let scale = 1.0 / (sample_rate * window_power);
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let mut power_db = Array2::<f32>::zeros((bins, frames));
        let mut buffer = vec![Complex32::ZERO; fft_size];
        for frame in 0..frames {
            let start = frame * hop;
            let take = window_size.min(samples.len() - start);
            buffer.fill(Complex32::ZERO);
            for i in 0..take {
                buffer[i] = Complex32::new(samples[start + i] * hann[i], 0.0);
            }
            fft.process(&mut buffer);
            for (bin, value) in buffer.iter().take(bins).enumerate() {
                let mut power = value.norm_sqr() * scale;
                // One-sided spectrum: interior bins carry both halves.
                if bin != 0 && bin != bins - 1 {
                    power *= 2.0;
                }
                power_db[[bin, frame]] = 10.0 * power.max(POWER_FLOOR).log10();
            }
        }
        Spectrogram {
            frequencies_hz,
            times_s,
            power_db,
        }
    }
}
