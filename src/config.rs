//! Dial configuration: size presets, temperature scale, and the validated
//! [`DialConfig`] the widget is built from.

use std::fmt;
use std::str::FromStr;

use facet_svg::Color;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ConfigError;

/// Degrees of the dial covered by tick lines
pub const DEFAULT_TICK_DEGREES: f64 = 300.0;

/// Pointer distance from the center below which drags are ignored
pub const DRAG_LOCK_AXIS_DISTANCE: f64 = 15.0;

/// Visual scale of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    #[default]
    Large,
    Medium,
    Small,
    Mini,
}

/// Pixel metrics implied by a [`SizePreset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetMetrics {
    pub diameter: f64,
    pub num_ticks: usize,
    /// How much further toward the center the large boundary ticks reach
    pub large_tick_offset: f64,
}

impl SizePreset {
    pub fn metrics(self) -> PresetMetrics {
        let (diameter, num_ticks, large_tick_offset) = match self {
            SizePreset::Large => (400.0, 150, 20.0),
            SizePreset::Medium => (300.0, 110, 15.0),
            SizePreset::Small => (200.0, 75, 10.0),
            SizePreset::Mini => (100.0, 38, 5.0),
        };
        PresetMetrics {
            diameter,
            num_ticks,
            large_tick_offset,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizePreset::Large => "large",
            SizePreset::Medium => "medium",
            SizePreset::Small => "small",
            SizePreset::Mini => "mini",
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(SizePreset::Large),
            "medium" => Ok(SizePreset::Medium),
            "small" => Ok(SizePreset::Small),
            "mini" => Ok(SizePreset::Mini),
            _ => Err(ConfigError::UnknownSize {
                value: s.to_string(),
            }),
        }
    }
}

// Settings files and the command line share one parser
impl<'de> Deserialize<'de> for SizePreset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Temperature scale; picks the default dial range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TemperatureScale {
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureScale {
    /// Default `(min, max)` of the dial for this scale.
    pub fn default_range(self) -> (f64, f64) {
        match self {
            TemperatureScale::Fahrenheit => (50.0, 90.0),
            TemperatureScale::Celsius => (10.0, 30.0),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Celsius => "C",
        }
    }
}

impl FromStr for TemperatureScale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "F" | "f" => Ok(TemperatureScale::Fahrenheit),
            "C" | "c" => Ok(TemperatureScale::Celsius),
            _ => Err(ConfigError::UnknownScale {
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for TemperatureScale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Colors used by the embedded stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub off: Color,
    pub heating: Color,
    pub cooling: Color,
    pub tick: Color,
    pub tick_active: Color,
    pub label: Color,
    pub leaf: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            off: Color::Rgb {
                r: 0x22,
                g: 0x22,
                b: 0x22,
            },
            heating: Color::Rgb {
                r: 0xe3,
                g: 0x63,
                b: 0x04,
            },
            cooling: Color::Rgb {
                r: 0x00,
                g: 0x7a,
                b: 0xf1,
            },
            tick: Color::Rgba {
                r: 255,
                g: 255,
                b: 255,
                a: 0.3,
            },
            tick_active: Color::Rgba {
                r: 255,
                g: 255,
                b: 255,
                a: 0.8,
            },
            label: Color::Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
            leaf: Color::Rgb {
                r: 0x13,
                g: 0xeb,
                b: 0x13,
            },
        }
    }
}

/// Theme colors as written in a settings file; every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub off: Option<String>,
    pub heating: Option<String>,
    pub cooling: Option<String>,
    pub tick: Option<String>,
    pub tick_active: Option<String>,
    pub label: Option<String>,
    pub leaf: Option<String>,
}

impl ThemeSpec {
    /// Overlay the given colors onto the default theme.
    pub fn resolve(&self) -> Result<Theme, ConfigError> {
        fn pick(
            name: &'static str,
            value: &Option<String>,
            fallback: Color,
        ) -> Result<Color, ConfigError> {
            match value {
                Some(s) => s.parse().map_err(|e: facet_svg::ColorParseError| {
                    ConfigError::InvalidColor {
                        name,
                        message: e.to_string(),
                    }
                }),
                None => Ok(fallback),
            }
        }

        let d = Theme::default();
        Ok(Theme {
            off: pick("off", &self.off, d.off)?,
            heating: pick("heating", &self.heating, d.heating)?,
            cooling: pick("cooling", &self.cooling, d.cooling)?,
            tick: pick("tick", &self.tick, d.tick)?,
            tick_active: pick("tick_active", &self.tick_active, d.tick_active)?,
            label: pick("label", &self.label, d.label)?,
            leaf: pick("leaf", &self.leaf, d.leaf)?,
        })
    }
}

/// Callback invoked with the normalized target when the user picks a new one.
pub type TargetCallback = Box<dyn FnMut(f64)>;

/// Options recognized by [`crate::create_dial`].
#[derive(Default)]
pub struct DialOptions {
    pub size_preset: SizePreset,
    pub temperature_scale: TemperatureScale,
    pub on_target_temperature_change: Option<TargetCallback>,
    /// Override the scale's default lower bound
    pub min_value: Option<f64>,
    /// Override the scale's default upper bound
    pub max_value: Option<f64>,
    /// Override [`DEFAULT_TICK_DEGREES`]
    pub tick_degrees: Option<f64>,
    pub theme: Theme,
    /// Embed the dial stylesheet in the SVG
    pub embed_style: bool,
}

impl DialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: SizePreset) -> Self {
        self.size_preset = size;
        self
    }

    pub fn scale(mut self, scale: TemperatureScale) -> Self {
        self.temperature_scale = scale;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn tick_degrees(mut self, degrees: f64) -> Self {
        self.tick_degrees = Some(degrees);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn embed_style(mut self, embed: bool) -> Self {
        self.embed_style = embed;
        self
    }

    pub fn on_target_temperature_change(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_target_temperature_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for DialOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialOptions")
            .field("size_preset", &self.size_preset)
            .field("temperature_scale", &self.temperature_scale)
            .field(
                "on_target_temperature_change",
                &self.on_target_temperature_change.is_some(),
            )
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("tick_degrees", &self.tick_degrees)
            .field("embed_style", &self.embed_style)
            .finish()
    }
}

/// Immutable dial configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    pub size_preset: SizePreset,
    pub temperature_scale: TemperatureScale,
    pub diameter: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub num_ticks: usize,
    pub tick_degrees: f64,
    pub large_tick_offset: f64,
    pub theme: Theme,
    pub embed_style: bool,
}

impl DialConfig {
    /// Resolve options against the preset and scale defaults, then validate.
    pub fn from_options(options: &DialOptions) -> Result<Self, ConfigError> {
        let metrics = options.size_preset.metrics();
        let (min, max) = options.temperature_scale.default_range();
        let config = Self {
            size_preset: options.size_preset,
            temperature_scale: options.temperature_scale,
            diameter: metrics.diameter,
            min_value: options.min_value.unwrap_or(min),
            max_value: options.max_value.unwrap_or(max),
            num_ticks: metrics.num_ticks,
            tick_degrees: options.tick_degrees.unwrap_or(DEFAULT_TICK_DEGREES),
            large_tick_offset: metrics.large_tick_offset,
            theme: options.theme.clone(),
            embed_style: options.embed_style,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(ConfigError::InvalidDiameter {
                value: self.diameter,
            });
        }
        // Written so NaN bounds fail too
        if !(self.min_value < self.max_value)
            || !self.min_value.is_finite()
            || !self.max_value.is_finite()
        {
            return Err(ConfigError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.num_ticks == 0 {
            return Err(ConfigError::NoTicks);
        }
        if !(self.tick_degrees > 0.0 && self.tick_degrees <= 360.0) {
            return Err(ConfigError::InvalidTickArc {
                degrees: self.tick_degrees,
            });
        }
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Degrees between neighbouring ticks
    pub fn tick_step(&self) -> f64 {
        self.tick_degrees / self.num_ticks as f64
    }

    /// Rotation that centers the tick arc around the bottom of the dial
    pub fn offset_degrees(&self) -> f64 {
        180.0 - (360.0 - self.tick_degrees) / 2.0
    }

    /// Distance from the top edge to the outer end of a tick
    pub fn ticks_outer_radius(&self) -> f64 {
        self.diameter / 30.0
    }

    /// Distance from the top edge to the inner end of a tick
    pub fn ticks_inner_radius(&self) -> f64 {
        self.diameter / 8.0
    }
}
