use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Physical Unit Newtypes
// ============================================================================

/// Oil/winding temperature in degrees Celsius.
///
/// Always within [`Temperature::MIN_C`, `Temperature::MAX_C`]; every
/// constructor (including deserialization) clamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    pub const MIN_C: f64 = 50.0;
    pub const MAX_C: f64 = 100.0;

    pub fn celsius(c: f64) -> Self {
        Self(c.clamp(Self::MIN_C, Self::MAX_C))
    }

    pub fn as_celsius(&self) -> f64 {
        self.0
    }

    /// Shift by `delta_c`, clamping the result.
    pub fn offset(&self, delta_c: f64) -> Self {
        Self::celsius(self.0 + delta_c)
    }
}

impl From<f64> for Temperature {
    fn from(c: f64) -> Self {
        Self::celsius(c)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", trim_float(self.0))
    }
}

/// Transformer load as a percentage of rated capacity, clamped to [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(from = "f64", into = "f64")]
pub struct LoadPercent(f64);

impl LoadPercent {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn percent(p: f64) -> Self {
        Self(p.clamp(Self::MIN, Self::MAX))
    }

    pub fn as_percent(&self) -> f64 {
        self.0
    }

    pub fn offset(&self, delta: f64) -> Self {
        Self::percent(self.0 + delta)
    }
}

impl From<f64> for LoadPercent {
    fn from(p: f64) -> Self {
        Self::percent(p)
    }
}

impl From<LoadPercent> for f64 {
    fn from(l: LoadPercent) -> Self {
        l.0
    }
}

impl fmt::Display for LoadPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", trim_float(self.0))
    }
}

/// Whole readings print without a fractional part, drifted ones with one decimal.
fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}
