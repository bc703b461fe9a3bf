//! Single-device readings from a Starling-style hub API.
//!
//! The body looks like `{"properties": {"currentTemperature": 20, ...}}` with
//! temperatures in Celsius.

use std::fmt;

use serde::Deserialize;

use crate::config::TemperatureScale;
use crate::container::Container;
use crate::dial::Dial;
use crate::errors::{FeedError, FeedResult};
use crate::geometry::fmt_num;
use crate::state::{HvacState, Truthy};

/// Header shown above the summary lines
pub const HEADER: &str = "Nest Thermostat";

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Operating mode as reported by the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HvacMode {
    Auto,
    Cool,
    Heat,
    Off,
    /// A code this crate does not know; shown verbatim
    Other(String),
}

impl HvacMode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "heatCool" => HvacMode::Auto,
            "cool" => HvacMode::Cool,
            "heat" => HvacMode::Heat,
            "off" => HvacMode::Off,
            other => HvacMode::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            HvacMode::Auto => "Auto",
            HvacMode::Cool => "Cool",
            HvacMode::Heat => "Heat",
            HvacMode::Off => "Off",
            HvacMode::Other(code) => code,
        }
    }

    /// The dial state implied by the mode alone. Auto says nothing about
    /// whether the system is heating or cooling.
    pub fn dial_state(&self) -> Option<HvacState> {
        match self {
            HvacMode::Heat => Some(HvacState::Heating),
            HvacMode::Cool => Some(HvacState::Cooling),
            HvacMode::Off => Some(HvacState::Off),
            HvacMode::Auto | HvacMode::Other(_) => None,
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize)]
struct Body {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Properties {
    current_temperature: f64,
    humidity_percent: f64,
    hvac_mode: String,
    #[serde(default)]
    target_temperature: Option<f64>,
    #[serde(default)]
    hvac_state: Option<String>,
    #[serde(default)]
    eco_mode: Option<bool>,
}

/// One poll's worth of thermostat data.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub temperature_c: f64,
    pub temperature_f: f64,
    pub humidity_percent: f64,
    pub hvac_mode: HvacMode,
    pub target_temperature_c: Option<f64>,
    pub hvac_state: Option<String>,
    pub eco_mode: Option<bool>,
}

impl Reading {
    /// Decode a response body.
    ///
    /// Empty and falsy bodies (`null`, `false`, `0`, `""`) yield `Ok(None)`.
    pub fn parse(body: &str) -> FeedResult<Option<Self>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.truthy() {
            return Ok(None);
        }
        let body: Body = serde_json::from_value(value).map_err(|e| FeedError::Malformed {
            message: e.to_string(),
        })?;
        let p = body.properties;
        Ok(Some(Self {
            temperature_c: p.current_temperature,
            temperature_f: celsius_to_fahrenheit(p.current_temperature),
            humidity_percent: round2(p.humidity_percent),
            hvac_mode: HvacMode::from_code(&p.hvac_mode),
            target_temperature_c: p.target_temperature,
            hvac_state: p.hvac_state,
            eco_mode: p.eco_mode,
        }))
    }

    pub fn temperature_in(&self, scale: TemperatureScale) -> f64 {
        match scale {
            TemperatureScale::Fahrenheit => self.temperature_f,
            TemperatureScale::Celsius => self.temperature_c,
        }
    }

    pub fn target_in(&self, scale: TemperatureScale) -> Option<f64> {
        self.target_temperature_c.map(|c| match scale {
            TemperatureScale::Fahrenheit => celsius_to_fahrenheit(c),
            TemperatureScale::Celsius => c,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "Mode: {}\nTemperature: {}°F\nHumidity: {}%",
            self.hvac_mode,
            fmt_num(self.temperature_f),
            fmt_num(self.humidity_percent)
        )
    }

    /// Push this reading into a dial, converted to the dial's scale.
    pub fn apply_to<C: Container>(&self, dial: &mut Dial<C>) {
        let scale = dial.config().temperature_scale;
        dial.set_ambient_temperature(self.temperature_in(scale));
        if let Some(target) = self.target_in(scale) {
            dial.set_target_temperature(target);
        }
        // An explicit state the dial understands wins over the mode
        let explicit = self
            .hvac_state
            .as_deref()
            .and_then(|s| s.parse::<HvacState>().ok());
        if let Some(state) = explicit.or_else(|| self.hvac_mode.dial_state()) {
            dial.set_hvac_state(state);
        }
        if let Some(eco) = self.eco_mode {
            dial.set_away(eco);
        }
    }
}
