/// Requested display range in seconds. Either bound may be left empty, in
/// which case it falls back to the start or full duration of the recording.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeWindow {
    pub start: Option<f64>,
    pub end: Option<f64>,
}
impl TimeWindow {
    pub fn full() -> Self {
        TimeWindow::default()
    }
    pub fn between(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
    /// Fill in defaults and clamp against the recording duration. Out-of-range
    /// bounds never fail; an inverted window collapses to an empty one.
    pub fn resolve(self, duration: f64) -> ResolvedWindow {
        let start = self.start.unwrap_or(0.0).max(0.0);
        let end = self.end.unwrap_or(duration).min(duration).max(start);
        ResolvedWindow { start, end }
    }
}
/// Half-open interval `[start, end)` with `0 <= start <= end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedWindow {
    pub start: f64,
    pub end: f64,
}
impl ResolvedWindow {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}
