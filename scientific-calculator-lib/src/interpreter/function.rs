//! The static registry of named functions and constants.

use crate::interpreter::angle::AngleMode;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

/// A named unary function, such as `sin` or `ln`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    NaturalLogarithm,
    CommonLogarithm,
    SquareRoot,
    Exp,
}

/// Every name the lexer accepts as a function, and what it maps to.
static REGISTRY: [(&str, Function); 11] = [
    ("sin", Function::Sin),
    ("cos", Function::Cos),
    ("tan", Function::Tan),
    ("asin", Function::Asin),
    ("acos", Function::Acos),
    ("atan", Function::Atan),
    ("ln", Function::NaturalLogarithm),
    ("log", Function::CommonLogarithm),
    ("log10", Function::CommonLogarithm),
    ("sqrt", Function::SquareRoot),
    ("exp", Function::Exp),
];

impl Function {
    pub fn lookup(name: &str) -> Option<Function> {
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, function)| *function)
    }

    /// Every name [`Function::lookup`] accepts, aliases included.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// The canonical name, as written in an expression.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::NaturalLogarithm => "ln",
            Function::CommonLogarithm => "log",
            Function::SquareRoot => "sqrt",
            Function::Exp => "exp",
        }
    }

    /// Applies the function to `x`. Trigonometric arguments and inverse
    /// trigonometric results are in the unit of `angle_mode`.
    ///
    /// Out-of-domain arguments produce NaN or an infinity, never a panic.
    pub fn apply(&self, x: f64, angle_mode: AngleMode) -> f64 {
        match self {
            Function::Sin => angle_mode.to_radians(x).sin(),
            Function::Cos => angle_mode.to_radians(x).cos(),
            Function::Tan => angle_mode.to_radians(x).tan(),
            Function::Asin => angle_mode.from_radians(x.asin()),
            Function::Acos => angle_mode.from_radians(x.acos()),
            Function::Atan => angle_mode.from_radians(x.atan()),
            Function::NaturalLogarithm => x.ln(),
            Function::CommonLogarithm => x.log10(),
            Function::SquareRoot => x.sqrt(),
            Function::Exp => x.exp(),
        }
    }
}

impl FromStr for Function {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Function::lookup(name).ok_or_else(|| anyhow::anyhow!("Unknown function '{}'", name))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named mathematical constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    Euler,
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::Euler => std::f64::consts::E,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Constant::Pi => 'π',
            Constant::Euler => 'e',
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    #[test]
    fn every_registered_name_resolves() {
        for (name, function) in REGISTRY {
            assert_eq!(Function::lookup(name), Some(function));
        }
        assert_eq!(Function::lookup("log10"), Some(Function::CommonLogarithm));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(Function::lookup("sinh").is_none());
        assert!("cot".parse::<Function>().is_err());
    }

    #[parameterized(
    function = {
    Function::Sin,
    Function::Cos,
    Function::Tan,
    },
    degrees = {
    30.0,
    60.0,
    45.0,
    },
    expected = {
    0.5,
    0.5,
    1.0,
    }
    )]
    fn trigonometry_in_degrees_converts_argument(function: Function, degrees: f64, expected: f64) {
        let actual = function.apply(degrees, AngleMode::Degrees);
        assert!((actual - expected).abs() < 1e-12, "{} != {}", actual, expected);
    }

    #[test]
    fn raw_and_radians_treat_argument_as_radians() {
        let raw = Function::Sin.apply(90.0, AngleMode::Raw);
        let radians = Function::Sin.apply(90.0, AngleMode::Radians);
        assert_eq!(raw, 90f64.sin());
        assert_eq!(radians, raw);
    }

    #[test]
    fn inverse_trigonometry_in_degrees_converts_result() {
        let actual = Function::Asin.apply(1.0, AngleMode::Degrees);
        assert!((actual - 90.0).abs() < 1e-12);
        let radians = Function::Acos.apply(-1.0, AngleMode::Radians);
        assert!((radians - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn out_of_domain_produces_nan() {
        assert!(Function::Asin.apply(2.0, AngleMode::Raw).is_nan());
        assert!(Function::SquareRoot.apply(-1.0, AngleMode::Raw).is_nan());
        assert_eq!(
            Function::NaturalLogarithm.apply(0.0, AngleMode::Raw),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn logarithms_and_exponential() {
        let common = Function::CommonLogarithm.apply(1000.0, AngleMode::Raw);
        assert!((common - 3.0).abs() < 1e-12);
        assert_eq!(Function::NaturalLogarithm.apply(1.0, AngleMode::Raw), 0.0);
        assert_eq!(Function::Exp.apply(0.0, AngleMode::Raw), 1.0);
        assert_eq!(Function::SquareRoot.apply(16.0, AngleMode::Degrees), 4.0);
    }
}
