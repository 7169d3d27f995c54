use plotters::style::RGBColor;
use crate::viz::channels::{self, AxisGroup, ChannelId, ChannelSource};
use crate::viz::config::{ResolvedWindow, TimeWindow};
use crate::viz::error::VizError;
use crate::viz::source::RecordingSession;
use crate::viz::spectrogram::{Spectrogram, SpectrogramComputer, SpectrogramParams};
/// How far the distance axis moves outward when it has to coexist with the
/// shared value axis.
const DISTANCE_AXIS_OFFSET_PX: i32 = 40;
/// One overlaid line: channel samples restricted to the display window, on
/// the absolute recording timeline.
#[derive(Clone, Debug)]
pub struct Trace {
    pub id: ChannelId,
    pub label: &'static str,
    pub color: RGBColor,
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}
/// One secondary value axis and the traces drawn against it.
#[derive(Clone, Debug)]
pub struct AxisPlan {
    pub group: AxisGroup,
    pub label: &'static str,
    pub y_range: (f64, f64),
    pub offset_px: i32,
    pub traces: Vec<Trace>,
}
/// Everything the renderer needs for one layered figure: the spectrogram on
/// the primary axis plus up to two secondary axes, all sharing the x-limits
/// `[window.start, window.end]`.
#[derive(Clone, Debug)]
pub struct RenderPlan {
    pub window: ResolvedWindow,
    pub spectrogram: Spectrogram,
    pub axes: Vec<AxisPlan>,
}
/// Build the layered figure description for one visualize request.
///
/// Derived channels are computed over the full series and sliced afterwards,
/// so a window change never changes a derived value, only which indices are
/// shown. The axis split is precomputed from the selection: bounded-value
/// channels share one axis, the distance channel gets its own.
pub fn compose(
    session: &RecordingSession,
    window: TimeWindow,
    selection: &[ChannelId],
    params: &SpectrogramParams,
) -> Result<RenderPlan, VizError> {
    let window = window.resolve(session.duration());
    let (lo, hi) = session.series.slice_range(&window);
    let times: Vec<f64> = session.series.timestamps()[lo..hi].to_vec();
    let audio_slice = session.audio.slice(&window);
    let mut spectrogram = SpectrogramComputer::with_params(*params).compute(&audio_slice);
    for time in &mut spectrogram.times_s {
        *time += window.start;
    }
    let mut value_traces = Vec::new();
    let mut distance_traces = Vec::new();
    for id in unique(selection) {
        let spec = channels::spec_for(id);
        let full = match spec.source {
            ChannelSource::Column(name) => match session.series.channel(name) {
                Some(values) => values.to_vec(),
                None if id == ChannelId::LipsDistance => {
                    return Err(VizError::malformed(
                        "mouth_data.csv has neither a LipsDistance nor a lipsDistance column",
                    ))
                }
                None => return Err(VizError::UnknownChannel(name.to_string())),
            },
            ChannelSource::Derived { op, a, b } => {
                channels::derived_values(&session.series, op, a, b)?
            }
        };
        let trace = Trace {
            id,
            label: spec.label,
            color: spec.color,
            times: times.clone(),
            values: full[lo..hi].to_vec(),
        };
        match spec.axis {
            AxisGroup::Value => value_traces.push(trace),
            AxisGroup::Distance => distance_traces.push(trace),
        }
    }
    let mut axes = Vec::new();
    if !value_traces.is_empty() {
        axes.push(axis_plan(AxisGroup::Value, 0, value_traces));
    }
    if !distance_traces.is_empty() {
        let offset = if axes.is_empty() {
            0
        } else {
            DISTANCE_AXIS_OFFSET_PX
        };
        axes.push(axis_plan(AxisGroup::Distance, offset, distance_traces));
    }
    log::debug!(
        "composed window [{:.3}, {:.3}): {} series frames, {} spectrogram frames, {} axes",
        window.start,
        window.end,
        hi - lo,
        spectrogram.frames(),
        axes.len()
    );
    Ok(RenderPlan {
        window,
        spectrogram,
        axes,
    })
}
fn unique(selection: &[ChannelId]) -> Vec<ChannelId> {
    let mut seen = Vec::new();
    for &id in selection {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
fn axis_plan(group: AxisGroup, offset_px: i32, traces: Vec<Trace>) -> AxisPlan {
    AxisPlan {
        group,
        label: group.axis_label(),
        y_range: value_range(&traces),
        offset_px,
        traces,
    }
}
fn value_range(traces: &[Trace]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in traces.iter().flat_map(|trace| trace.values.iter()) {
        min = min.min(*value);
        max = max.max(*value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    // Keep a flat line away from the axis edge.
    let pad = ((max - min) * 0.1).max(0.05);
    (min - pad, max + pad)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::audio::AudioBuffer;
    use crate::viz::series::TimeSeries;
    use crate::viz::source::{ManualSource, RecordingSession};
    fn session(with_distance: bool) -> RecordingSession {
        let mut channels = vec![
            ("jawOpen".to_string(), vec![0.2, 0.8, 0.5]),
            ("mouthClose".to_string(), vec![0.1, 0.3, 0.4]),
        ];
        if with_distance {
            channels.push(("lipsDistance".to_string(), vec![1.5, 2.0, 1.1]));
        }
        let series = TimeSeries::from_columns(vec![0.0, 0.5, 1.0], channels).unwrap();
        let audio = AudioBuffer::new(1000, vec![0.1; 1100]).unwrap();
        RecordingSession::load(&ManualSource::new(series, audio)).unwrap()
    }
    fn small_params() -> SpectrogramParams {
        SpectrogramParams {
            window_size: 64,
            overlap: 32,
            fft_size: 64,
        }
    }
    #[test]
    fn window_selects_only_contained_frames() {
        let session = session(false);
        let plan = compose(
            &session,
            TimeWindow::between(0.4, 1.1),
            &[ChannelId::JawOpenDiff],
            &small_params(),
        )
        .unwrap();
        let trace = &plan.axes[0].traces[0];
        assert_eq!(trace.times, vec![0.5, 1.0]);
        assert!((trace.values[0] - 0.5).abs() < 1e-9);
        assert!((trace.values[1] - 0.1).abs() < 1e-9);
    }
    #[test]
    fn derived_values_match_the_pointwise_definition() {
        let session = session(false);
        let plan = compose(
            &session,
            TimeWindow::full(),
            &[ChannelId::JawOpenDiff, ChannelId::JawOpenGated],
            &small_params(),
        )
        .unwrap();
        let diff = &plan.axes[0].traces[0];
        let gated = &plan.axes[0].traces[1];
        for (value, expected) in diff.values.iter().zip([0.1, 0.5, 0.1]) {
            assert!((value - expected).abs() < 1e-9);
        }
        for (value, expected) in gated.values.iter().zip([0.18, 0.56, 0.30]) {
            assert!((value - expected).abs() < 1e-9);
        }
    }
    #[test]
    fn distance_gets_its_own_outward_axis() {
        let session = session(true);
        let plan = compose(
            &session,
            TimeWindow::full(),
            &[
                ChannelId::JawOpen,
                ChannelId::MouthClose,
                ChannelId::LipsDistance,
            ],
            &small_params(),
        )
        .unwrap();
        assert_eq!(plan.axes.len(), 2);
        assert_eq!(plan.axes[0].group, AxisGroup::Value);
        assert_eq!(plan.axes[0].traces.len(), 2);
        assert_eq!(plan.axes[0].offset_px, 0);
        assert_eq!(plan.axes[1].group, AxisGroup::Distance);
        assert_eq!(plan.axes[1].offset_px, DISTANCE_AXIS_OFFSET_PX);
    }
    #[test]
    fn lone_distance_axis_needs_no_offset() {
        let session = session(true);
        let plan = compose(
            &session,
            TimeWindow::full(),
            &[ChannelId::LipsDistance],
            &small_params(),
        )
        .unwrap();
        assert_eq!(plan.axes.len(), 1);
        assert_eq!(plan.axes[0].offset_px, 0);
    }
    #[test]
    fn empty_selection_is_a_spectrogram_only_view() {
        let session = session(false);
        let plan = compose(&session, TimeWindow::full(), &[], &small_params()).unwrap();
        assert!(plan.axes.is_empty());
        assert!(plan.spectrogram.frames() > 0);
    }
    #[test]
    fn spectrogram_times_sit_on_the_recording_timeline() {
        let session = session(false);
        let plan = compose(
            &session,
            TimeWindow::between(0.5, 1.1),
            &[],
            &small_params(),
        )
        .unwrap();
        for &time in &plan.spectrogram.times_s {
            assert!(time >= plan.window.start);
            assert!(time <= plan.window.end);
        }
        assert!((plan.spectrogram.times_s[0] - (0.5 + 32.0 / 1000.0)).abs() < 1e-9);
    }
    #[test]
    fn requesting_the_absent_distance_column_is_malformed() {
        let session = session(false);
        let result = compose(
            &session,
            TimeWindow::full(),
            &[ChannelId::LipsDistance],
            &small_params(),
        );
        assert!(matches!(result, Err(VizError::MalformedInput { .. })));
    }
    #[test]
    fn raw_channel_absent_from_the_series_is_unknown() {
        let series = TimeSeries::from_columns(
            vec![0.0, 1.0],
            vec![("jawOpen".to_string(), vec![0.2, 0.4])],
        )
        .unwrap();
        let audio = AudioBuffer::new(1000, vec![0.0; 1000]).unwrap();
        let session = RecordingSession::load(&ManualSource::new(series, audio)).unwrap();
        let result = compose(
            &session,
            TimeWindow::full(),
            &[ChannelId::MouthClose],
            &small_params(),
        );
        assert!(matches!(result, Err(VizError::UnknownChannel(name)) if name == "mouthClose"));
    }
    #[test]
    fn clamped_out_of_range_window_still_composes() {
        let session = session(true);
        let plan = compose(
            &session,
            TimeWindow::between(-5.0, 1e9),
            &[ChannelId::JawOpen],
            &small_params(),
        )
        .unwrap();
        assert_eq!(plan.window.start, 0.0);
        assert!((plan.window.end - session.duration()).abs() < 1e-12);
        assert_eq!(plan.axes[0].traces[0].times.len(), 3);
    }
    #[test]
    fn empty_window_yields_an_empty_plan_not_an_error() {
        let session = session(false);
        let plan = compose(
            &session,
            TimeWindow::between(0.9, 0.2),
            &[ChannelId::JawOpen],
            &small_params(),
        )
        .unwrap();
        assert!(plan.window.is_empty());
        assert!(plan.axes[0].traces[0].values.is_empty());
        assert_eq!(plan.spectrogram.frames(), 0);
    }
    #[test]
    fn duplicate_selection_entries_collapse() {
        let session = session(false);
        let plan = compose(
            &session,
            TimeWindow::full(),
            &[ChannelId::JawOpen, ChannelId::JawOpen],
            &small_params(),
        )
        .unwrap();
        assert_eq!(plan.axes[0].traces.len(), 1);
    }
}
