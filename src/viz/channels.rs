use once_cell::sync::Lazy;
use plotters::style::colors::{BLUE, CYAN, GREEN, MAGENTA, RED};
use plotters::style::RGBColor;
use crate::viz::error::VizError;
use crate::viz::series::TimeSeries;
/// Fixed display vocabulary: the three raw capture channels plus the two
/// derived jaw/mouth combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelId {
    JawOpen,
    MouthClose,
    LipsDistance,
    JawOpenDiff,
    JawOpenGated,
}
impl ChannelId {
    pub fn parse(name: &str) -> Result<Self, VizError> {
        // Display labels contain spaces around operators; accept them with or
        // without whitespace so CLI input stays forgiving.
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.as_str() {
            "jawOpen" => Ok(ChannelId::JawOpen),
            "mouthClose" => Ok(ChannelId::MouthClose),
            "lipsDistance" | "LipsDistance" => Ok(ChannelId::LipsDistance),
            "jawOpen-mouthClose" => Ok(ChannelId::JawOpenDiff),
            "jawOpen*(1-mouthClose)" => Ok(ChannelId::JawOpenGated),
            _ => Err(VizError::UnknownChannel(name.to_string())),
        }
    }
}
/// Channels sharing one value axis and scale. Bounded blendshape weights and
/// the centimeter-valued lip distance never share an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisGroup {
    Value,
    Distance,
}
impl AxisGroup {
    pub fn axis_label(self) -> &'static str {
        match self {
            AxisGroup::Value => "Attribute Value",
            AxisGroup::Distance => "LipsDistance [cm]",
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivedOp {
    Difference,
    GatedComplement,
}
impl DerivedOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            DerivedOp::Difference => a - b,
            DerivedOp::GatedComplement => a * (1.0 - b),
        }
    }
}
#[derive(Clone, Copy, Debug)]
pub enum ChannelSource {
    Column(&'static str),
    Derived {
        op: DerivedOp,
        a: &'static str,
        b: &'static str,
    },
}
/// One registry entry per selectable channel: how to obtain the values and
/// how to display them.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSpec {
    pub id: ChannelId,
    pub label: &'static str,
    pub axis: AxisGroup,
    pub color: RGBColor,
    pub source: ChannelSource,
}
static CHANNELS: Lazy<Vec<ChannelSpec>> = Lazy::new(|| {
    vec![
        ChannelSpec {
            id: ChannelId::JawOpen,
            label: "jawOpen",
            axis: AxisGroup::Value,
            color: RED,
            source: ChannelSource::Column("jawOpen"),
        },
        ChannelSpec {
            id: ChannelId::MouthClose,
            label: "mouthClose",
            axis: AxisGroup::Value,
            color: BLUE,
            source: ChannelSource::Column("mouthClose"),
        },
        ChannelSpec {
            id: ChannelId::LipsDistance,
            label: "LipsDistance [cm]",
            axis: AxisGroup::Distance,
            color: CYAN,
            source: ChannelSource::Column("lipsDistance"),
        },
        ChannelSpec {
            id: ChannelId::JawOpenDiff,
            label: "jawOpen - mouthClose",
            axis: AxisGroup::Value,
            color: GREEN,
            source: ChannelSource::Derived {
                op: DerivedOp::Difference,
                a: "jawOpen",
                b: "mouthClose",
            },
        },
        ChannelSpec {
            id: ChannelId::JawOpenGated,
            label: "jawOpen * (1 - mouthClose)",
            axis: AxisGroup::Value,
            color: MAGENTA,
            source: ChannelSource::Derived {
                op: DerivedOp::GatedComplement,
                a: "jawOpen",
                b: "mouthClose",
            },
        },
    ]
});
pub fn channel_registry() -> &'static [ChannelSpec] {
    &CHANNELS
}
pub fn spec_for(id: ChannelId) -> &'static ChannelSpec {
    CHANNELS
        .iter()
        .find(|spec| spec.id == id)
        .expect("every ChannelId has a registry entry")
}
/// Pointwise derived channel over the full series, aligned 1:1 with its
/// timestamps. Each output index depends only on the two operand values at
/// that index, so computing before or after a window slice is equivalent.
pub fn derived_values(
    series: &TimeSeries,
    op: DerivedOp,
    a: &str,
    b: &str,
) -> Result<Vec<f64>, VizError> {
    let a = series
        .channel(a)
        .ok_or_else(|| VizError::MissingChannel(a.to_string()))?;
    let b = series
        .channel(b)
        .ok_or_else(|| VizError::MissingChannel(b.to_string()))?;
    Ok(a.iter()
        .zip(b)
        .map(|(&a, &b)| op.apply(a, b))
        .collect())
}
