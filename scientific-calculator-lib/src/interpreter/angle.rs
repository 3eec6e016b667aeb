use std::fmt;
use std::fmt::Formatter;

/// How trigonometric functions interpret their arguments and results.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum AngleMode {
    /// No conversion at all. Behaves like [`AngleMode::Radians`] but is kept apart
    /// for the plain calculator that does not advertise a unit.
    #[default]
    Raw,
    Radians,
    Degrees,
}

impl AngleMode {
    /// The mode following this one in the RAW → RADIANS → DEGREES → RAW cycle.
    pub fn next(self) -> AngleMode {
        match self {
            AngleMode::Raw => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Raw,
        }
    }

    /// Converts an angle in this mode's unit to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_radians(),
            AngleMode::Raw | AngleMode::Radians => angle,
        }
    }

    /// Converts an angle in radians to this mode's unit.
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Degrees => angle.to_degrees(),
            AngleMode::Raw | AngleMode::Radians => angle,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Raw => write!(f, "RAW"),
            AngleMode::Radians => write!(f, "RAD"),
            AngleMode::Degrees => write!(f, "DEG"),
        }
    }
}
