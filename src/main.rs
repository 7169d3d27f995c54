// src/main.rs
mod textgrid;
mod viz;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use viz::{ChannelId, FolderSource, PlotStyle, RecordingSession, SpectrogramParams, TimeWindow};
const USAGE: &str = "\
Usage: lipsviz <recording-folder> [options]

Reads mouth_data.csv and audio.wav from the folder and renders the audio
spectrogram with the selected capture channels overlaid.

Options:
  --start SECONDS     window start (default: 0)
  --end SECONDS       window end (default: full duration)
  --channels LIST     comma-separated channels to overlay, from:
                      jawOpen, mouthClose, lipsDistance,
                      'jawOpen - mouthClose', 'jawOpen * (1 - mouthClose)'
  --out FILE          PNG output path (default: figure.png)
  --size WxH          figure size in pixels (default: 1200x800)
  --textgrid FILE     also export the series as a Praat TextGrid
  --help              print this text
";
struct Args {
    folder: PathBuf,
    start: Option<f64>,
    end: Option<f64>,
    channels: Vec<ChannelId>,
    out: Option<PathBuf>,
    textgrid: Option<PathBuf>,
    size: (u32, u32),
}
impl Args {
    fn parse(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>> {
        let mut folder = None;
        let mut start = None;
        let mut end = None;
        let mut channels = Vec::new();
        let mut out = None;
        let mut textgrid = None;
        let mut size = (1200, 800);
        while let Some(arg) = argv.next() {
            let mut value = |name: &str| {
                argv.next()
                    .with_context(|| format!("{name} expects a value"))
            };
            match arg.as_str() {
                "--help" | "-h" => return Ok(None),
                "--start" => start = Some(parse_seconds(&value("--start")?)?),
                "--end" => end = Some(parse_seconds(&value("--end")?)?),
                "--channels" => {
                    for name in value("--channels")?.split(',') {
                        let name = name.trim();
                        if !name.is_empty() {
                            channels.push(ChannelId::parse(name)?);
                        }
                    }
                }
                "--out" => out = Some(PathBuf::from(value("--out")?)),
                "--textgrid" => textgrid = Some(PathBuf::from(value("--textgrid")?)),
                "--size" => size = parse_size(&value("--size")?)?,
                other if other.starts_with('-') => bail!("unknown option {other}"),
                other => {
                    if folder.replace(PathBuf::from(other)).is_some() {
                        bail!("more than one recording folder given");
                    }
                }
            }
        }
        let Some(folder) = folder else {
            bail!("no recording folder given (try --help)");
        };
        Ok(Some(Args {
            folder,
            start,
            end,
            channels,
            out,
            textgrid,
            size,
        }))
    }
    /// The figure is skipped only when the run is a pure TextGrid export.
    fn figure_path(&self) -> Option<PathBuf> {
        match (&self.out, &self.textgrid) {
            (Some(out), _) => Some(out.clone()),
            (None, Some(_)) => None,
            (None, None) => Some(PathBuf::from("figure.png")),
        }
    }
}
fn parse_seconds(text: &str) -> Result<f64> {
    text.parse()
        .with_context(|| format!("invalid time in seconds: {text:?}"))
}
fn parse_size(text: &str) -> Result<(u32, u32)> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .with_context(|| format!("invalid size {text:?}, expected WxH"))?;
    Ok((
        w.parse().with_context(|| format!("invalid width {w:?}"))?,
        h.parse().with_context(|| format!("invalid height {h:?}"))?,
    ))
}
fn main() -> Result<()> {
    env_logger::init();
    let Some(args) = Args::parse(std::env::args().skip(1))? else {
        print!("{USAGE}");
        return Ok(());
    };
    let source = FolderSource::new(&args.folder);
    let session = RecordingSession::load(&source)
        .with_context(|| format!("failed to load recording from {}", args.folder.display()))?;
    if let Some(path) = &args.textgrid {
        let text = textgrid::render_textgrid(&session.series)?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = args.figure_path() {
        let window = TimeWindow {
            start: args.start,
            end: args.end,
        };
        let plan = viz::compose(
            &session,
            window,
            &args.channels,
            &SpectrogramParams::default(),
        )?;
        let style = PlotStyle {
            width: args.size.0,
            height: args.size.1,
        };
        let png = viz::render_plan_png(&plan, style)?;
        std::fs::write(&path, png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    fn args(list: &[&str]) -> Result<Option<Args>> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }
    #[test]
    fn folder_with_defaults() {
        let args = args(&["rec"]).unwrap().unwrap();
        assert_eq!(args.folder, PathBuf::from("rec"));
        assert_eq!(args.start, None);
        assert!(args.channels.is_empty());
        assert_eq!(args.figure_path(), Some(PathBuf::from("figure.png")));
    }
    #[test]
    fn window_and_channel_flags() {
        let args = args(&[
            "rec",
            "--start",
            "1.5",
            "--end",
            "4",
            "--channels",
            "jawOpen, jawOpen - mouthClose",
        ])
        .unwrap()
        .unwrap();
        assert_eq!(args.start, Some(1.5));
        assert_eq!(args.end, Some(4.0));
        assert_eq!(
            args.channels,
            vec![ChannelId::JawOpen, ChannelId::JawOpenDiff]
        );
    }
    #[test]
    fn textgrid_only_runs_skip_the_figure() {
        let textgrid_only = args(&["rec", "--textgrid", "out.TextGrid"]).unwrap().unwrap();
        assert_eq!(textgrid_only.figure_path(), None);
        let both = args(&["rec", "--textgrid", "o.TextGrid", "--out", "fig.png"])
            .unwrap()
            .unwrap();
        assert_eq!(both.figure_path(), Some(PathBuf::from("fig.png")));
    }
    #[test]
    fn unknown_flags_and_bad_values_fail() {
        assert!(args(&["rec", "--nope"]).is_err());
        assert!(args(&["rec", "--start", "soon"]).is_err());
        assert!(args(&["rec", "--channels", "browRaise"]).is_err());
        assert!(args(&[]).is_err());
    }
}
