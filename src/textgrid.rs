//! Praat TextGrid export: the capture series as two point tiers, one point
//! per frame, labeled with the stringified channel value. Independent of the
//! visualization pipeline.
use std::fmt::Write;
use crate::viz::{TimeSeries, VizError};
const TIERS: [(&str, &str); 2] = [("Jaw Open", "jawOpen"), ("Mouth Close", "mouthClose")];
pub fn render_textgrid(series: &TimeSeries) -> Result<String, VizError> {
    let channels: Vec<&[f64]> = TIERS
        .iter()
        .map(|(_, channel)| {
            series
                .channel(channel)
                .ok_or_else(|| VizError::MissingChannel(channel.to_string()))
        })
        .collect::<Result<_, _>>()?;
    let xmax = series.duration();
    let mut out = String::new();
    // Writing to a String cannot fail.
    let w = &mut out;
    writeln!(w, "File type = \"ooTextFile\"").unwrap();
    writeln!(w, "Object class = \"TextGrid\"").unwrap();
    writeln!(w).unwrap();
    writeln!(w, "xmin = 0").unwrap();
    writeln!(w, "xmax = {xmax}").unwrap();
    writeln!(w, "tiers? <exists>").unwrap();
    writeln!(w, "size = {}", TIERS.len()).unwrap();
    writeln!(w, "item []:").unwrap();
    for (tier_index, ((name, _), values)) in TIERS.iter().zip(&channels).enumerate() {
        writeln!(w, "    item [{}]:", tier_index + 1).unwrap();
        writeln!(w, "        class = \"TextTier\"").unwrap();
        writeln!(w, "        name = \"{name}\"").unwrap();
        writeln!(w, "        xmin = 0").unwrap();
        writeln!(w, "        xmax = {xmax}").unwrap();
        writeln!(w, "        points: size = {}", series.len()).unwrap();
        for (point, (&time, &value)) in series.timestamps().iter().zip(*values).enumerate() {
            writeln!(w, "        points [{}]:", point + 1).unwrap();
            writeln!(w, "            number = {time}").unwrap();
            writeln!(w, "            mark = \"{value}\"").unwrap();
        }
    }
    Ok(out)
}
