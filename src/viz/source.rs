use std::path::PathBuf;
use crate::viz::audio::AudioBuffer;
use crate::viz::error::VizError;
use crate::viz::series::TimeSeries;
/// Trait representing something that can yield the two halves of a recording.
pub trait RecordingSource {
    fn read_series(&self) -> Result<TimeSeries, VizError>;
    fn read_audio(&self) -> Result<AudioBuffer, VizError>;
}
/// Fixed on-disk layout: `mouth_data.csv` plus `audio.wav` in one folder.
pub struct FolderSource {
    folder: PathBuf,
}
impl FolderSource {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}
impl RecordingSource for FolderSource {
    fn read_series(&self) -> Result<TimeSeries, VizError> {
        let text = std::fs::read_to_string(self.folder.join("mouth_data.csv"))?;
        parse_mouth_csv(&text)
    }
    fn read_audio(&self) -> Result<AudioBuffer, VizError> {
        let mut reader = hound::WavReader::open(self.folder.join("audio.wav"))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;
        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()?
            }
        };
        AudioBuffer::new(spec.sample_rate, downmix(&interleaved, channels))
    }
}
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
/// Header-indexed parse of `mouth_data.csv`. The distance column appears as
/// `LipsDistance` in some capture versions and `lipsDistance` in others; both
/// load into the canonical `lipsDistance` channel. A missing distance column
/// is tolerated here and only reported once the channel is displayed.
pub fn parse_mouth_csv(text: &str) -> Result<TimeSeries, VizError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| VizError::malformed("mouth_data.csv is empty"))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let find = |name: &str| columns.iter().position(|c| *c == name);
    let required = |name: &'static str| {
        find(name).ok_or_else(|| VizError::malformed(format!("missing {name} column")))
    };
    let time_col = required("TimeStamp")?;
    let jaw_col = required("jawOpen")?;
    let mouth_col = required("mouthClose")?;
    let distance_col = find("LipsDistance").or_else(|| find("lipsDistance"));
    let mut timestamps = Vec::new();
    let mut jaw = Vec::new();
    let mut mouth = Vec::new();
    let mut distance = Vec::new();
    for (row, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        timestamps.push(parse_field(&fields, time_col, row)?);
        jaw.push(parse_field(&fields, jaw_col, row)?);
        mouth.push(parse_field(&fields, mouth_col, row)?);
        if let Some(col) = distance_col {
            distance.push(parse_field(&fields, col, row)?);
        }
    }
    let mut channels = vec![
        ("jawOpen".to_string(), jaw),
        ("mouthClose".to_string(), mouth),
    ];
    if distance_col.is_some() {
        channels.push(("lipsDistance".to_string(), distance));
    }
    TimeSeries::from_columns(timestamps, channels)
}
fn parse_field(fields: &[&str], col: usize, row: usize) -> Result<f64, VizError> {
    let field = fields
        .get(col)
        .ok_or_else(|| VizError::malformed(format!("row {} has too few fields", row + 1)))?;
    field
        .parse()
        .map_err(|_| VizError::malformed(format!("row {} has non-numeric value {field:?}", row + 1)))
}
/// In-memory source useful for tests and deterministic pipelines.
pub struct ManualSource {
    series: TimeSeries,
    audio: AudioBuffer,
}
impl ManualSource {
    pub fn new(series: TimeSeries, audio: AudioBuffer) -> Self {
        Self { series, audio }
    }
}
impl RecordingSource for ManualSource {
    fn read_series(&self) -> Result<TimeSeries, VizError> {
        Ok(self.series.clone())
    }
    fn read_audio(&self) -> Result<AudioBuffer, VizError> {
        Ok(self.audio.clone())
    }
}
/// The immutable buffers every visualize call reads from, loaded once per
/// recording folder.
pub struct RecordingSession {
    pub series: TimeSeries,
    pub audio: AudioBuffer,
}
impl RecordingSession {
    pub fn load(source: &dyn RecordingSource) -> Result<Self, VizError> {
        let series = source.read_series()?;
        let audio = source.read_audio()?;
        log::info!(
            "loaded recording: {} frames over {:.2} s, {:.2} s of audio at {} Hz",
            series.len(),
            series.duration(),
            audio.duration(),
            audio.sample_rate()
        );
        if audio.duration() < series.duration() {
            log::warn!(
                "audio ends {:.2} s before the capture series; trailing frames have no sound",
                series.duration() - audio.duration()
            );
        }
        Ok(Self { series, audio })
    }
    /// Recording duration used to resolve window defaults. Audio normally
    /// outlasts the capture series, but either one may be truncated.
    pub fn duration(&self) -> f64 {
        self.series.duration().max(self.audio.duration())
    }
}
