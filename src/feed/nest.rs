//! Thermostat listings from the Nest developer devices endpoint.
//!
//! The endpoint returns every device on the account keyed by id; only the
//! `thermostats` map is of interest here.

use serde::Deserialize;

use crate::config::TemperatureScale;
use crate::container::Container;
use crate::dial::Dial;
use crate::errors::{FeedError, FeedResult};
use crate::geometry::fmt_num;

pub const NO_DATA_MESSAGE: &str =
    "Token works, but no data received. Make sure you are using the master account.";
pub const NO_THERMOSTATS_MESSAGE: &str = "No Thermostats.";

/// Which thermostats to keep from a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceFilter {
    pub only_online: bool,
    /// Keep only these `where_name`s. `None` keeps all; an empty list keeps none.
    pub where_names: Option<Vec<String>>,
}

impl DeviceFilter {
    fn keeps(&self, raw: &RawThermostat) -> bool {
        if self.only_online && !raw.is_online.unwrap_or(false) {
            return false;
        }
        match &self.where_names {
            Some(names) => raw.where_name.as_ref().is_some_and(|w| names.contains(w)),
            None => true,
        }
    }
}

/// One thermostat, with temperatures already in its own display scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatSnapshot {
    pub device_id: String,
    pub where_name: String,
    pub temperature_scale: TemperatureScale,
    pub has_leaf: bool,
    pub hvac_state: String,
    pub target_temperature: Option<f64>,
    pub ambient_temperature: Option<f64>,
}

impl ThermostatSnapshot {
    pub fn summary(&self) -> String {
        let unit = self.temperature_scale.symbol();
        let fmt = |v: Option<f64>| v.map_or_else(|| "?".to_string(), fmt_num);
        format!(
            "{}: {}°{unit}, target {}°{unit}, {}",
            self.where_name,
            fmt(self.ambient_temperature),
            fmt(self.target_temperature),
            self.hvac_state
        )
    }

    pub fn apply_to<C: Container>(&self, dial: &mut Dial<C>) {
        dial.set_name(self.where_name.clone());
        dial.set_has_leaf(self.has_leaf);
        dial.set_hvac_state(&self.hvac_state);
        if let Some(target) = self.target_temperature {
            dial.set_target_temperature(target);
        }
        if let Some(ambient) = self.ambient_temperature {
            dial.set_ambient_temperature(ambient);
        }
    }
}

/// Result of one devices poll: either thermostats, or a message saying why
/// there are none.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport {
    pub message: Option<String>,
    pub thermostats: Option<Vec<ThermostatSnapshot>>,
}

impl DeviceReport {
    fn message(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            thermostats: None,
        }
    }

    /// Decode a devices body and apply `filter`.
    pub fn parse(body: &str, filter: &DeviceFilter) -> FeedResult<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if value.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(Self::message(NO_DATA_MESSAGE));
        }
        let devices: Devices = serde_json::from_value(value).map_err(|e| FeedError::Malformed {
            message: e.to_string(),
        })?;
        let Some(thermostats) = devices.thermostats.filter(|t| !t.is_empty()) else {
            return Ok(Self::message(NO_THERMOSTATS_MESSAGE));
        };

        let mut kept = Vec::new();
        for (id, value) in thermostats {
            // One odd device should not sink the whole listing
            let raw: RawThermostat = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    crate::log::warn!("skipping thermostat {}: {}", id, e);
                    continue;
                }
            };
            if filter.keeps(&raw) {
                kept.push(raw.into_snapshot(id));
            }
        }
        Ok(Self {
            message: None,
            thermostats: Some(kept),
        })
    }

    pub fn first(&self) -> Option<&ThermostatSnapshot> {
        self.thermostats.as_ref().and_then(|t| t.first())
    }

    pub fn summary(&self) -> String {
        match (&self.message, &self.thermostats) {
            (Some(message), _) => message.clone(),
            (None, Some(list)) if !list.is_empty() => list
                .iter()
                .map(ThermostatSnapshot::summary)
                .collect::<Vec<_>>()
                .join("\n"),
            _ => NO_THERMOSTATS_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Devices {
    #[serde(default)]
    thermostats: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawThermostat {
    where_name: Option<String>,
    temperature_scale: Option<String>,
    has_leaf: Option<bool>,
    hvac_state: Option<String>,
    is_online: Option<bool>,
    target_temperature_f: Option<f64>,
    target_temperature_c: Option<f64>,
    ambient_temperature_f: Option<f64>,
    ambient_temperature_c: Option<f64>,
}

impl RawThermostat {
    fn into_snapshot(self, device_id: String) -> ThermostatSnapshot {
        let scale = match self.temperature_scale.as_deref() {
            Some("F") => TemperatureScale::Fahrenheit,
            _ => TemperatureScale::Celsius,
        };
        let (target, ambient) = match scale {
            TemperatureScale::Fahrenheit => (self.target_temperature_f, self.ambient_temperature_f),
            TemperatureScale::Celsius => (self.target_temperature_c, self.ambient_temperature_c),
        };
        ThermostatSnapshot {
            device_id,
            where_name: self.where_name.unwrap_or_default(),
            temperature_scale: scale,
            has_leaf: self.has_leaf.unwrap_or(false),
            hvac_state: self.hvac_state.unwrap_or_else(|| "off".to_string()),
            target_temperature: target,
            ambient_temperature: ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "thermostats": {
            "dev-a": {
                "where_name": "Hallway",
                "temperature_scale": "F",
                "has_leaf": true,
                "hvac_state": "heating",
                "is_online": true,
                "target_temperature_f": 70,
                "target_temperature_c": 21,
                "ambient_temperature_f": 68,
                "ambient_temperature_c": 20
            },
            "dev-b": {
                "where_name": "Basement",
                "temperature_scale": "C",
                "has_leaf": false,
                "hvac_state": "off",
                "is_online": false,
                "target_temperature_c": 18.5,
                "ambient_temperature_c": 16
            }
        }
    }"#;

    #[test]
    fn picks_temperatures_in_device_scale() {
        let report = DeviceReport::parse(LISTING, &DeviceFilter::default()).unwrap();
        let list = report.thermostats.as_ref().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].device_id, "dev-a");
        assert_eq!(list[0].target_temperature, Some(70.0));
        assert_eq!(list[0].ambient_temperature, Some(68.0));
        assert_eq!(list[1].temperature_scale, TemperatureScale::Celsius);
        assert_eq!(list[1].target_temperature, Some(18.5));
        insta::assert_snapshot!(report.summary(), @r"
        Hallway: 68°F, target 70°F, heating
        Basement: 16°C, target 18.5°C, off
        ");
    }

    #[test]
    fn filters_offline_and_by_location() {
        let online = DeviceFilter {
            only_online: true,
            where_names: None,
        };
        let report = DeviceReport::parse(LISTING, &online).unwrap();
        assert_eq!(report.first().unwrap().where_name, "Hallway");
        assert_eq!(report.thermostats.unwrap().len(), 1);

        let basement = DeviceFilter {
            only_online: false,
            where_names: Some(vec!["Basement".to_string()]),
        };
        let report = DeviceReport::parse(LISTING, &basement).unwrap();
        assert_eq!(report.first().unwrap().device_id, "dev-b");

        let nowhere = DeviceFilter {
            only_online: false,
            where_names: Some(vec!["Attic".to_string()]),
        };
        let report = DeviceReport::parse(LISTING, &nowhere).unwrap();
        assert_eq!(report.thermostats, Some(vec![]));
        assert_eq!(report.summary(), NO_THERMOSTATS_MESSAGE);
    }

    #[test]
    fn empty_location_filter_keeps_nothing() {
        let empty = DeviceFilter {
            only_online: false,
            where_names: Some(vec![]),
        };
        let report = DeviceReport::parse(LISTING, &empty).unwrap();
        assert_eq!(report.message, None);
        assert_eq!(report.thermostats, Some(vec![]));
        assert!(report.first().is_none());
    }

    #[test]
    fn empty_listings_produce_messages() {
        let report = DeviceReport::parse("{}", &DeviceFilter::default()).unwrap();
        assert_eq!(report.message.as_deref(), Some(NO_DATA_MESSAGE));
        assert!(report.thermostats.is_none());

        let report =
            DeviceReport::parse(r#"{"smoke_co_alarms": {}}"#, &DeviceFilter::default()).unwrap();
        assert_eq!(report.message.as_deref(), Some(NO_THERMOSTATS_MESSAGE));
    }

    #[test]
    fn odd_devices_are_skipped() {
        let body = r#"{"thermostats": {"x": {"has_leaf": "yes"}, "y": {"where_name": "Den"}}}"#;
        let report = DeviceReport::parse(body, &DeviceFilter::default()).unwrap();
        let list = report.thermostats.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].where_name, "Den");
        assert_eq!(list[0].hvac_state, "off");
    }
}
