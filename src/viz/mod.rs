// src/viz/mod.rs
// Temporal alignment and overlay engine for one recorded capture session.
pub mod audio;
pub mod channels;
pub mod config;
pub mod error;
pub mod overlay;
pub mod plot;
pub mod series;
pub mod source;
pub mod spectrogram;
pub use audio::AudioBuffer;
pub use channels::{channel_registry, AxisGroup, ChannelId, ChannelSpec, DerivedOp};
pub use config::{ResolvedWindow, TimeWindow};
pub use error::VizError;
pub use overlay::{compose, AxisPlan, RenderPlan, Trace};
pub use plot::{render_plan_png, PlotStyle};
pub use series::TimeSeries;
pub use source::{FolderSource, ManualSource, RecordingSession, RecordingSource};
pub use spectrogram::{Spectrogram, SpectrogramComputer, SpectrogramParams};
