//! An SVG thermostat dial in the style of the Nest Learning Thermostat.
//!
//! A [`Dial`] keeps its state (target, ambient, HVAC state, leaf, away, name),
//! renders a typed SVG scene on every change, and hands it to a
//! [`Container`]. The [`feed`] module polls thermostat APIs and pushes
//! readings into a dial.
//!
//! ```no_run
//! use thermodial::{DialOptions, SvgBuffer, create_dial};
//!
//! let mut dial = create_dial(SvgBuffer::new(), DialOptions::new())?;
//! dial.set_target_temperature(71.5);
//! dial.set_ambient_temperature(68.0);
//! dial.set_hvac_state("heating");
//! let svg = dial.container().latest();
//! # Ok::<(), thermodial::ConfigError>(())
//! ```

pub mod log;

pub mod config;
pub mod container;
pub mod dial;
pub mod errors;
pub mod feed;
pub mod geometry;
pub mod render;
pub mod settings;
pub mod state;

pub use config::{DialConfig, DialOptions, SizePreset, TemperatureScale, Theme, ThemeSpec};
pub use container::{Container, SvgBuffer, SvgFile};
pub use dial::{Dial, create_dial};
pub use errors::{ConfigError, FeedError, FeedResult, RenderError, SettingsError};
pub use render::Scene;
pub use settings::{Settings, load_settings};
pub use state::{DialState, HvacState, IntoHvacState, Truthy};
