//! Error types with diagnostics using miette

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised when a dial configuration violates its invariants
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid temperature range: min {min} must be below max {max}")]
    #[diagnostic(
        code(thermodial::config::invalid_range),
        help("check min_value/max_value or the temperature scale")
    )]
    InvalidRange { min: f64, max: f64 },

    #[error("dial needs at least one tick")]
    #[diagnostic(code(thermodial::config::no_ticks))]
    NoTicks,

    #[error("tick arc must be in (0, 360] degrees, got {degrees}")]
    #[diagnostic(code(thermodial::config::invalid_tick_arc))]
    InvalidTickArc { degrees: f64 },

    #[error("invalid diameter: {value}")]
    #[diagnostic(code(thermodial::config::invalid_diameter))]
    InvalidDiameter { value: f64 },

    #[error("unknown size preset: {value}")]
    #[diagnostic(
        code(thermodial::config::unknown_size),
        help("expected one of: large, medium, small, mini")
    )]
    UnknownSize { value: String },

    #[error("unknown temperature scale: {value}")]
    #[diagnostic(
        code(thermodial::config::unknown_scale),
        help("expected F or C")
    )]
    UnknownScale { value: String },

    #[error("invalid theme color for {name}: {message}")]
    #[diagnostic(code(thermodial::config::invalid_color))]
    InvalidColor { name: &'static str, message: String },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while serializing the dial scene
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("XML serialization error: {message}")]
    #[diagnostic(code(thermodial::render::serialize))]
    Serialize { message: String },
}

// ============================================================================
// Feed Errors
// ============================================================================

/// Errors from fetching or decoding thermostat data
#[derive(Error, Diagnostic, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    #[diagnostic(code(thermodial::feed::http))]
    Http(#[from] reqwest::Error),

    #[error("{source_name} Error - Status: {status}")]
    #[diagnostic(code(thermodial::feed::status))]
    Status { source_name: &'static str, status: u16 },

    #[error("JSON error: {0}")]
    #[diagnostic(code(thermodial::feed::json))]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {message}")]
    #[diagnostic(code(thermodial::feed::malformed))]
    Malformed { message: String },

    #[error("Please provide a Nest access token in the settings file")]
    #[diagnostic(
        code(thermodial::feed::missing_token),
        help("set [feed] token = \"...\"")
    )]
    MissingToken,

    #[error("missing feed setting: {name}")]
    #[diagnostic(code(thermodial::feed::missing_setting))]
    MissingSetting { name: &'static str },
}

/// Result type for feed operations.
pub type FeedResult<T> = std::result::Result<T, FeedError>;

// ============================================================================
// Settings Errors
// ============================================================================

/// Errors loading the settings file
#[derive(Error, Diagnostic, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(thermodial::settings::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    #[diagnostic(code(thermodial::settings::parse))]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
