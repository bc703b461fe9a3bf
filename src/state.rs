//! Mutable dial state and its normalization rules.
//!
//! Each `apply_*` method normalizes the incoming value and reports whether it
//! was stored. The widget renders after every stored value, including ones
//! equal to what was already there.

use std::fmt;
use std::str::FromStr;

use crate::config::DialConfig;
use crate::geometry::{clamp, round_to_half};

/// What the HVAC system is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum HvacState {
    #[default]
    Off,
    Heating,
    Cooling,
}

impl HvacState {
    pub const ALL: [HvacState; 3] = [HvacState::Off, HvacState::Heating, HvacState::Cooling];

    pub fn as_str(self) -> &'static str {
        match self {
            HvacState::Off => "off",
            HvacState::Heating => "heating",
            HvacState::Cooling => "cooling",
        }
    }
}

impl fmt::Display for HvacState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `off`, `heating`, `cooling`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHvacState(pub String);

impl fmt::Display for UnknownHvacState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown hvac state: {}", self.0)
    }
}

impl std::error::Error for UnknownHvacState {}

impl FromStr for HvacState {
    type Err = UnknownHvacState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HvacState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownHvacState(s.to_string()))
    }
}

/// Scripting-style truthiness for boolean-ish inputs.
///
/// `false`, zero, NaN, the empty string and `None`/`null` are falsy.
pub trait Truthy {
    fn truthy(&self) -> bool;
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                fn truthy(&self) -> bool { *self != 0 }
            }
        )*
    };
}

impl_truthy_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Truthy for f32 {
    fn truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn truthy(&self) -> bool {
        (**self).truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::truthy)
    }
}

impl Truthy for serde_json::Value {
    fn truthy(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f.truthy()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Anything that can be offered as an HVAC state.
///
/// Strings are validated; unknown ones are rejected rather than stored.
pub trait IntoHvacState {
    fn into_hvac_state(self) -> Option<HvacState>;
}

impl IntoHvacState for HvacState {
    fn into_hvac_state(self) -> Option<HvacState> {
        Some(self)
    }
}

impl IntoHvacState for &str {
    fn into_hvac_state(self) -> Option<HvacState> {
        self.parse().ok()
    }
}

impl IntoHvacState for &String {
    fn into_hvac_state(self) -> Option<HvacState> {
        self.parse().ok()
    }
}

impl IntoHvacState for String {
    fn into_hvac_state(self) -> Option<HvacState> {
        self.parse().ok()
    }
}

/// Mutable dial state, owned by the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct DialState {
    pub(crate) target_temperature: f64,
    pub(crate) ambient_temperature: f64,
    pub(crate) hvac_state: HvacState,
    pub(crate) has_leaf: bool,
    pub(crate) away: bool,
    pub(crate) name: String,
}

impl DialState {
    /// Initial state: both temperatures at the dial minimum, everything else off.
    pub fn new(config: &DialConfig) -> Self {
        Self {
            target_temperature: config.min_value,
            ambient_temperature: config.min_value,
            hvac_state: HvacState::Off,
            has_leaf: false,
            away: false,
            name: String::new(),
        }
    }

    pub fn target_temperature(&self) -> f64 {
        self.target_temperature
    }

    pub fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }

    pub fn hvac_state(&self) -> HvacState {
        self.hvac_state
    }

    pub fn has_leaf(&self) -> bool {
        self.has_leaf
    }

    pub fn away(&self) -> bool {
        self.away
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Round to the nearest half degree, then clamp into the dial range.
    pub fn normalize_target(config: &DialConfig, value: f64) -> Option<f64> {
        value
            .is_finite()
            .then(|| clamp(round_to_half(value), config.min_value, config.max_value))
    }

    pub fn apply_target_temperature(&mut self, config: &DialConfig, value: f64) -> bool {
        match Self::normalize_target(config, value) {
            Some(v) => {
                self.target_temperature = v;
                true
            }
            None => false,
        }
    }

    /// Ambient is rounded but never clamped; the label shows the true reading.
    pub fn apply_ambient_temperature(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.ambient_temperature = round_to_half(value);
        true
    }

    pub fn apply_hvac_state(&mut self, value: impl IntoHvacState) -> bool {
        match value.into_hvac_state() {
            Some(state) => {
                self.hvac_state = state;
                true
            }
            None => false,
        }
    }

    pub fn apply_has_leaf(&mut self, value: impl Truthy) -> bool {
        self.has_leaf = value.truthy();
        true
    }

    pub fn apply_away(&mut self, value: impl Truthy) -> bool {
        self.away = value.truthy();
        true
    }

    pub fn apply_name(&mut self, value: impl Into<String>) -> bool {
        self.name = value.into();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialOptions;
    use serde_json::json;

    fn config() -> DialConfig {
        DialConfig::from_options(&DialOptions::new()).unwrap()
    }

    #[test]
    fn starts_at_minimum() {
        let state = DialState::new(&config());
        assert_eq!(state.target_temperature(), 50.0);
        assert_eq!(state.ambient_temperature(), 50.0);
        assert_eq!(state.hvac_state(), HvacState::Off);
        assert!(!state.has_leaf());
        assert!(!state.away());
        assert_eq!(state.name(), "");
    }

    #[test]
    fn target_is_rounded_then_clamped() {
        let config = config();
        let mut state = DialState::new(&config);
        assert!(state.apply_target_temperature(&config, 999.0));
        assert_eq!(state.target_temperature(), 90.0);
        assert!(state.apply_target_temperature(&config, 71.3));
        assert_eq!(state.target_temperature(), 71.5);
        assert!(state.apply_target_temperature(&config, -40.0));
        assert_eq!(state.target_temperature(), 50.0);
        assert!(!state.apply_target_temperature(&config, f64::NAN));
        assert_eq!(state.target_temperature(), 50.0);
    }

    #[test]
    fn ambient_is_rounded_not_clamped() {
        let mut state = DialState::new(&config());
        assert!(state.apply_ambient_temperature(72.3));
        assert_eq!(state.ambient_temperature(), 72.5);
        assert!(state.apply_ambient_temperature(101.2));
        assert_eq!(state.ambient_temperature(), 101.0);
        assert!(!state.apply_ambient_temperature(f64::INFINITY));
        assert_eq!(state.ambient_temperature(), 101.0);
    }

    #[test]
    fn hvac_state_validates() {
        let mut state = DialState::new(&config());
        assert!(state.apply_hvac_state("heating"));
        assert_eq!(state.hvac_state(), HvacState::Heating);
        assert!(!state.apply_hvac_state("bogus"));
        assert!(!state.apply_hvac_state("Heating"));
        assert_eq!(state.hvac_state(), HvacState::Heating);
        assert!(state.apply_hvac_state(HvacState::Cooling));
        assert_eq!(state.hvac_state(), HvacState::Cooling);
    }

    #[test]
    fn truthiness() {
        assert!(1i32.truthy());
        assert!(!0u8.truthy());
        assert!(!f64::NAN.truthy());
        assert!(!"".truthy());
        assert!("no".truthy());
        assert!(!None::<bool>.truthy());
        assert!(Some(true).truthy());
        assert!(!json!(null).truthy());
        assert!(!json!(0).truthy());
        assert!(json!({}).truthy());
        assert!(json!([]).truthy());
        assert!(json!("x").truthy());
    }

    #[test]
    fn flags_are_coerced() {
        let mut state = DialState::new(&config());
        state.apply_has_leaf("yes");
        assert!(state.has_leaf());
        state.apply_has_leaf(0);
        assert!(!state.has_leaf());
        state.apply_away(json!(true));
        assert!(state.away());
        state.apply_away(None::<bool>);
        assert!(!state.away());
    }
}
