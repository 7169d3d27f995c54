use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::viz::error::VizError;
use crate::viz::overlay::{AxisPlan, RenderPlan};
#[derive(Clone, Copy, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}
/// Render a composed plan into PNG bytes: the spectrogram heatmap on the
/// primary axis, overlay lines against their secondary axes, every axis
/// sharing the plan's x-limits.
pub fn render_plan_png(plan: &RenderPlan, style: PlotStyle) -> Result<Vec<u8>, VizError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE)?;
        let x_start = plan.window.start;
        // A collapsed window still needs a drawable axis span.
        let x_end = if plan.window.is_empty() {
            plan.window.start + 1.0
        } else {
            plan.window.end
        };
        let nyquist = plan.spectrogram.nyquist_hz().max(1.0);
        let outward = plan.axes.iter().map(|axis| axis.offset_px).max().unwrap_or(0);
        let right_label_area = if outward > 0 { 70 + outward as u32 } else { 60 };
        let secondary_range = plan
            .axes
            .first()
            .map(|axis| axis.y_range)
            .unwrap_or((0.0, 1.0));
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Spectrogram with selected attributes",
                ("sans-serif", 22).into_font(),
            )
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .set_label_area_size(LabelAreaPosition::Right, right_label_area)
            .build_cartesian_2d(x_start..x_end, 0f32..nyquist)?
            .set_secondary_coord(x_start..x_end, secondary_range.0..secondary_range.1);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("Time [s]")
            .y_desc("Frequency [Hz]")
            .label_style(("sans-serif", 13))
            .draw()?;
        let spect = &plan.spectrogram;
        let frames = spect.frames();
        if frames > 0 {
            let mut db_min = f32::INFINITY;
            let mut db_max = f32::NEG_INFINITY;
            for &value in spect.power_db.iter() {
                db_min = db_min.min(value);
                db_max = db_max.max(value);
            }
            let db_span = (db_max - db_min).max(1e-6);
            let half_dt = if frames > 1 {
                (spect.times_s[1] - spect.times_s[0]) / 2.0
            } else {
                ((x_end - x_start) / 2.0).max(1e-6)
            };
            let half_df = if spect.frequencies_hz.len() > 1 {
                (spect.frequencies_hz[1] - spect.frequencies_hz[0]) / 2.0
            } else {
                nyquist / 2.0
            };
            chart.draw_series((0..frames).flat_map(|frame| {
                let time = spect.times_s[frame];
                let cell_x0 = (time - half_dt).max(x_start);
                let cell_x1 = (time + half_dt).min(x_end);
                (0..spect.frequencies_hz.len()).map(move |bin| {
                    let freq = spect.frequencies_hz[bin];
                    let norm = (spect.power_db[[bin, frame]] - db_min) / db_span;
                    Rectangle::new(
                        [
                            (cell_x0, (freq - half_df).max(0.0)),
                            (cell_x1, (freq + half_df).min(nyquist)),
                        ],
                        heat_color(norm).filled(),
                    )
                })
            }))?;
        }
        if let Some(first) = plan.axes.first() {
            chart
                .configure_secondary_axes()
                .y_desc(first.label)
                .label_style(("sans-serif", 13))
                .draw()?;
        }
        for (index, axis) in plan.axes.iter().enumerate() {
            for trace in &axis.traces {
                let (lo, hi) = axis.y_range;
                let (sec_lo, sec_hi) = secondary_range;
                // Later axes carry their own scale; their lines are mapped
                // through the first axis' coordinate range for drawing.
                let points: Vec<(f64, f64)> = trace
                    .times
                    .iter()
                    .zip(&trace.values)
                    .map(|(&t, &v)| {
                        let v = if index == 0 {
                            v
                        } else {
                            sec_lo + (v - lo) / (hi - lo).max(1e-12) * (sec_hi - sec_lo)
                        };
                        (t, v)
                    })
                    .collect();
                let color = trace.color;
                chart
                    .draw_secondary_series(LineSeries::new(points, &color))?
                    .label(trace.label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], &color)
                    });
            }
            if index > 0 {
                let pixel_range = chart.plotting_area().get_pixel_range();
                draw_outward_axis(&root, &pixel_range, axis)?;
            }
        }
        if !plan.axes.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .border_style(&BLACK.mix(0.3))
                .background_style(&WHITE.mix(0.85))
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Hand-drawn value axis offset outward from the plot's right edge, for a
/// group that cannot share the built-in secondary axis.
fn draw_outward_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    pixel_range: &(std::ops::Range<i32>, std::ops::Range<i32>),
    axis: &AxisPlan,
) -> Result<(), VizError>
where
    DB::ErrorType: 'static,
{
    let color = axis
        .traces
        .first()
        .map(|trace| trace.color)
        .unwrap_or(BLACK);
    let x = pixel_range.0.end + axis.offset_px;
    let (y_top, y_bottom) = (pixel_range.1.start, pixel_range.1.end);
    root.draw(&PathElement::new(vec![(x, y_top), (x, y_bottom)], &color))?;
    let ticks = 5;
    for tick in 0..ticks {
        let fraction = tick as f64 / (ticks - 1) as f64;
        let value = axis.y_range.0 + fraction * (axis.y_range.1 - axis.y_range.0);
        let y = y_bottom - ((y_bottom - y_top) as f64 * fraction).round() as i32;
        root.draw(&PathElement::new(vec![(x, y), (x + 4, y)], &color))?;
        root.draw(&Text::new(
            format!("{value:.2}"),
            (x + 7, y - 6),
            ("sans-serif", 12).into_font().color(&color),
        ))?;
    }
    root.draw(&Text::new(
        axis.label.to_string(),
        (x - 50, y_top - 18),
        ("sans-serif", 13).into_font().color(&color),
    ))?;
    Ok(())
}
// Plasma-like ramp from dark blue through violet and orange to yellow.
const HEAT_STOPS: [(f32, (u8, u8, u8)); 5] = [
    (0.00, (13, 8, 135)),
    (0.25, (126, 3, 168)),
    (0.50, (204, 71, 120)),
    (0.75, (248, 149, 64)),
    (1.00, (240, 249, 33)),
];
fn heat_color(norm: f32) -> RGBColor {
    let norm = norm.clamp(0.0, 1.0);
    let mut lower = HEAT_STOPS[0];
    for upper in HEAT_STOPS.iter().skip(1) {
        if norm <= upper.0 {
            let span = (upper.0 - lower.0).max(1e-6);
            let t = (norm - lower.0) / span;
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            return RGBColor(
                lerp(lower.1 .0, upper.1 .0),
                lerp(lower.1 .1, upper.1 .1),
                lerp(lower.1 .2, upper.1 .2),
            );
        }
        lower = *upper;
    }
    RGBColor(HEAT_STOPS[4].1 .0, HEAT_STOPS[4].1 .1, HEAT_STOPS[4].1 .2)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, VizError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| VizError::Render("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::audio::AudioBuffer;
    use crate::viz::channels::ChannelId;
    use crate::viz::config::TimeWindow;
    use crate::viz::overlay::compose;
    use crate::viz::series::TimeSeries;
    use crate::viz::source::{ManualSource, RecordingSession};
    use crate::viz::spectrogram::SpectrogramParams;
    fn small_plan(selection: &[ChannelId]) -> RenderPlan {
        let series = TimeSeries::from_columns(
            vec![0.0, 0.5, 1.0],
            vec![
                ("jawOpen".to_string(), vec![0.2, 0.8, 0.5]),
                ("mouthClose".to_string(), vec![0.1, 0.3, 0.4]),
                ("lipsDistance".to_string(), vec![1.5, 2.0, 1.1]),
            ],
        )
        .unwrap();
        let audio = AudioBuffer::new(1000, vec![0.05; 1100]).unwrap();
        let session = RecordingSession::load(&ManualSource::new(series, audio)).unwrap();
        let params = SpectrogramParams {
            window_size: 64,
            overlap: 32,
            fft_size: 64,
        };
        compose(&session, TimeWindow::full(), selection, &params).unwrap()
    }
    #[test]
    fn layered_figure_renders_to_png() {
        let plan = small_plan(&[
            ChannelId::JawOpen,
            ChannelId::JawOpenDiff,
            ChannelId::LipsDistance,
        ]);
        let style = PlotStyle {
            width: 400,
            height: 300,
        };
        let png = render_plan_png(&plan, style).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn spectrogram_only_figure_renders_to_png() {
        let plan = small_plan(&[]);
        let style = PlotStyle {
            width: 320,
            height: 240,
        };
        let png = render_plan_png(&plan, style).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn heat_ramp_covers_both_ends() {
        let low = heat_color(0.0);
        assert_eq!((low.0, low.1, low.2), (13, 8, 135));
        let high = heat_color(1.0);
        assert_eq!((high.0, high.1, high.2), (240, 249, 33));
    }
}
