//! Thermostat data feeds
//!
//! A feed polls a remote API and turns each response into a [`FeedUpdate`]
//! that can be pushed into a [`Dial`](crate::dial::Dial).

mod client;
pub mod nest;
pub mod reading;

pub use client::{DEFAULT_API_PATH, DEFAULT_NEST_URL, FeedClient, FeedSource, poll, poll_once};
pub use nest::{DeviceFilter, DeviceReport, ThermostatSnapshot};
pub use reading::{HEADER, HvacMode, Reading, celsius_to_fahrenheit, round2};

use crate::container::Container;
use crate::dial::Dial;

/// One successful poll.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    Reading(Reading),
    Devices(DeviceReport),
}

impl FeedUpdate {
    /// Human-readable lines for logs and text displays.
    pub fn summary(&self) -> String {
        match self {
            FeedUpdate::Reading(reading) => reading.summary(),
            FeedUpdate::Devices(report) => report.summary(),
        }
    }

    /// Push the update into `dial`. A devices report drives the dial from its
    /// first thermostat; an empty report leaves the dial alone.
    pub fn apply_to<C: Container>(&self, dial: &mut Dial<C>) {
        match self {
            FeedUpdate::Reading(reading) => reading.apply_to(dial),
            FeedUpdate::Devices(report) => {
                if let Some(thermostat) = report.first() {
                    thermostat.apply_to(dial);
                }
            }
        }
    }
}
