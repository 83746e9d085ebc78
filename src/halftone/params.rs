use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::color::FillColor;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{HalftoneError, HalftoneResult};

/// Shape drawn at each sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Filled circle, radius = dot size.
    #[default]
    Circle,
    /// Filled axis-aligned square, side = 2 * dot size.
    Square,
}

/// Which single channel of the source stands in for brightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessChannel {
    #[default]
    Red,
    Green,
    Blue,
}

impl BrightnessChannel {
    pub fn read(self, px: Rgba8) -> u8 {
        match self {
            Self::Red => px.r,
            Self::Green => px.g,
            Self::Blue => px.b,
        }
    }
}

/// User-facing render parameters.
///
/// Integers are signed because they come straight from UI controls; [`Self::validate`] is the
/// single gate that turns them into [`GridSettings`] before any drawing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderParameters {
    /// Upper bound for the shape diameter / edge length, in pixels.
    pub dot_size: i32,
    /// Grid pitch in pixels. Must be >= 1.
    pub spacing: i32,
    pub color: FillColor,
    pub shape: Shape,
    pub channel: BrightnessChannel,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            dot_size: 10,
            spacing: 5,
            color: FillColor::default(),
            shape: Shape::Circle,
            channel: BrightnessChannel::Red,
        }
    }
}

impl RenderParameters {
    /// Parse parameters from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> HalftoneResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HalftoneError::serde(format!("parse render parameters JSON: {e}")))
    }

    /// Parse parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HalftoneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HalftoneError::serde(format!(
                "open render parameters JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values that would make the grid walk ill-defined.
    pub fn validate(&self) -> HalftoneResult<GridSettings> {
        if self.spacing < 1 {
            return Err(HalftoneError::invalid_parameter(format!(
                "spacing must be >= 1, got {}",
                self.spacing
            )));
        }
        if self.dot_size < 0 {
            return Err(HalftoneError::invalid_parameter(format!(
                "dot_size must be >= 0, got {}",
                self.dot_size
            )));
        }
        Ok(GridSettings {
            dot_size_max: self.dot_size as u32,
            spacing: self.spacing as u32,
            color: self.color,
            shape: self.shape,
            channel: self.channel,
        })
    }

    /// Same as `self` with spacing raised to at least 1 and dot size to at least 0.
    pub fn clamped(&self) -> Self {
        Self {
            dot_size: self.dot_size.max(0),
            spacing: self.spacing.max(1),
            ..self.clone()
        }
    }
}

/// Validated parameters. `spacing >= 1` holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSettings {
    pub(crate) dot_size_max: u32,
    pub(crate) spacing: u32,
    pub(crate) color: FillColor,
    pub(crate) shape: Shape,
    pub(crate) channel: BrightnessChannel,
}

impl GridSettings {
    pub fn dot_size_max(&self) -> u32 {
        self.dot_size_max
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn color(&self) -> FillColor {
        self.color
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn channel(&self) -> BrightnessChannel {
        self.channel
    }
}

#[cfg(test)]
#[path = "../../tests/unit/halftone/params.rs"]
mod tests;
