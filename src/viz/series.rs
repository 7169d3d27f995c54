use crate::viz::config::ResolvedWindow;
use crate::viz::error::VizError;
/// Per-frame capture data: one timestamp per frame plus named scalar channels
/// of identical length, in declaration order. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<f64>,
    channels: Vec<(String, Vec<f64>)>,
}
impl TimeSeries {
    pub fn from_columns(
        timestamps: Vec<f64>,
        channels: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, VizError> {
        for (name, values) in &channels {
            if values.len() != timestamps.len() {
                return Err(VizError::malformed(format!(
                    "channel {name} has {} values for {} timestamps",
                    values.len(),
                    timestamps.len()
                )));
            }
        }
        if timestamps.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(VizError::malformed("timestamps are not in ascending order"));
        }
        Ok(Self {
            timestamps,
            channels,
        })
    }
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channels
            .iter()
            .find(|(channel, _)| channel == name)
            .map(|(_, values)| values.as_slice())
    }
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|(name, _)| name.as_str())
    }
    /// Last timestamp, or zero for an empty series.
    pub fn duration(&self) -> f64 {
        self.timestamps.last().copied().unwrap_or(0.0)
    }
    /// Contiguous index range `[lo, hi)` of frames inside the window.
    /// Timestamps are sorted, so both bounds come from a binary search; no
    /// interpolation happens at the edges.
    pub fn slice_range(&self, window: &ResolvedWindow) -> (usize, usize) {
        let lo = self.timestamps.partition_point(|&t| t < window.start);
        let hi = self.timestamps.partition_point(|&t| t < window.end);
        (lo, hi.max(lo))
    }
    pub fn slice(&self, window: &ResolvedWindow) -> TimeSeries {
        let (lo, hi) = self.slice_range(window);
        TimeSeries {
            timestamps: self.timestamps[lo..hi].to_vec(),
            channels: self
                .channels
                .iter()
                .map(|(name, values)| (name.clone(), values[lo..hi].to_vec()))
                .collect(),
        }
    }
}
