//! Symbolic values that reference other bodies' properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use units::normalize_degrees;

use crate::error::ExpressionError;
use crate::property::{Property, PropertyKind, ValueContext};
use crate::table::BodyTable;

/// A configuration value, either a plain number or a reference to a body.
///
/// Parsed once at load and resolved against the current [`BodyTable`] every
/// time it is needed, so that moving bodies yield current values.
///
/// Text forms:
///
/// ```text
/// 1.5e9
/// Ratio(Kerbin.sma, 0.5)
/// Resonance(Jool, 2:3)
/// Offset(Kerbin.mnl, 30)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpressionRepr", into = "ExpressionRepr")]
pub enum Expression {
    Literal(f64),

    /// `body.property * factor`
    Ratio {
        body: String,
        property: Property,
        factor: f64,
    },

    /// Semimajor axis of an orbit in p:q mean-motion resonance with `body`,
    /// `sma * (p/q)^(2/3)`
    Resonance { body: String, p: u32, q: u32 },

    /// `body.property + delta` degrees, wrapped to [0, 360)
    Offset {
        body: String,
        property: Property,
        delta: f64,
    },
}

impl Expression {
    pub fn literal(value: f64) -> Self {
        Self::Literal(value)
    }

    pub fn ratio(body: impl Into<String>, property: Property, factor: f64) -> Self {
        Self::Ratio {
            body: body.into(),
            property,
            factor,
        }
    }

    pub fn resonance(body: impl Into<String>, p: u32, q: u32) -> Result<Self, ExpressionError> {
        if q == 0 {
            return Err(ExpressionError::InvalidResonance { p, q });
        }
        Ok(Self::Resonance {
            body: body.into(),
            p,
            q,
        })
    }

    pub fn offset(body: impl Into<String>, property: Property, delta: f64) -> Self {
        Self::Offset {
            body: body.into(),
            property,
            delta,
        }
    }

    /// The constant value, if this expression does not reference a body.
    pub fn as_literal(&self) -> Option<f64> {
        match self {
            Self::Literal(value) => Some(*value),
            _ => None,
        }
    }

    /// Name of the referenced body, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Ratio { body, .. } | Self::Resonance { body, .. } | Self::Offset { body, .. } => {
                Some(body)
            }
        }
    }

    /// Evaluate against `table` for a value of the given kind.
    ///
    /// Reads the table only; the same expression and table always produce the
    /// same number.
    pub fn resolve(&self, table: &BodyTable, context: ValueContext) -> Result<f64, ExpressionError> {
        match self {
            Self::Literal(value) => Ok(*value),

            Self::Ratio {
                body,
                property,
                factor,
            } => {
                check_context(*property, context)?;
                Ok(table.property(body, *property)? * factor)
            }

            Self::Resonance { body, p, q } => {
                if *q == 0 {
                    return Err(ExpressionError::InvalidResonance { p: *p, q: *q });
                }
                check_context(Property::SemiMajorAxis, context)?;
                let sma = table.property(body, Property::SemiMajorAxis)?;
                Ok(sma * (*p as f64 / *q as f64).powf(2.0 / 3.0))
            }

            Self::Offset {
                body,
                property,
                delta,
            } => {
                if property.kind() != PropertyKind::Angle {
                    return Err(ExpressionError::UnknownProperty {
                        property: property.code().to_string(),
                        reason: "offsets apply only to angles".to_string(),
                    });
                }
                check_context(*property, context)?;
                Ok(normalize_degrees(table.property(body, *property)? + delta))
            }
        }
    }
}

fn check_context(property: Property, context: ValueContext) -> Result<(), ExpressionError> {
    if context.accepts(property.kind()) {
        Ok(())
    } else {
        Err(ExpressionError::UnknownProperty {
            property: property.code().to_string(),
            reason: format!("a {context} value is expected here"),
        })
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Ratio {
                body,
                property,
                factor,
            } => write!(f, "Ratio({body}.{property}, {factor})"),
            Self::Resonance { body, p, q } => write!(f, "Resonance({body}, {p}:{q})"),
            Self::Offset {
                body,
                property,
                delta,
            } => write!(f, "Offset({body}.{property}, {delta})"),
        }
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(value) = text.parse::<f64>() {
            if value.is_finite() {
                return Ok(Self::Literal(value));
            }
        }

        let malformed = |reason: &str| ExpressionError::MalformedExpression {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let (name, rest) = text
            .split_once('(')
            .ok_or_else(|| malformed("expected a number or a function call"))?;
        let inner = rest
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| malformed("missing closing parenthesis"))?;
        let args: Vec<&str> = inner.split(',').map(str::trim).collect();

        let name = name.trim().to_ascii_lowercase();
        match (name.as_str(), args.as_slice()) {
            ("ratio", [target, factor]) => {
                let (body, property) = parse_target(target, text)?;
                let factor = parse_number(factor, text)?;
                Ok(Self::ratio(body, property, factor))
            }
            ("resonance", [body, ratio]) => {
                let body = parse_body(body, text)?;
                let (p, q) = ratio
                    .split_once(':')
                    .ok_or_else(|| malformed("resonance must be written p:q"))?;
                let p = p
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| malformed("resonance terms must be whole numbers"))?;
                let q = q
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| malformed("resonance terms must be whole numbers"))?;
                Self::resonance(body, p, q)
            }
            ("offset", [target, delta]) => {
                let (body, property) = parse_target(target, text)?;
                let delta = parse_number(delta, text)?;
                Ok(Self::offset(body, property, delta))
            }
            ("ratio" | "resonance" | "offset", _) => Err(malformed("expected two arguments")),
            _ => Err(malformed("unknown function")),
        }
    }
}

fn parse_body<'a>(body: &'a str, text: &str) -> Result<&'a str, ExpressionError> {
    if body.is_empty() {
        return Err(ExpressionError::MalformedExpression {
            text: text.to_string(),
            reason: "missing body name".to_string(),
        });
    }
    Ok(body)
}

/// Splits `Body.code` at the last dot.
fn parse_target<'a>(target: &'a str, text: &str) -> Result<(&'a str, Property), ExpressionError> {
    let (body, code) = target
        .rsplit_once('.')
        .ok_or_else(|| ExpressionError::MalformedExpression {
            text: text.to_string(),
            reason: format!("`{target}` should be written Body.property"),
        })?;
    Ok((parse_body(body.trim(), text)?, code.parse()?))
}

fn parse_number(value: &str, text: &str) -> Result<f64, ExpressionError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ExpressionError::MalformedExpression {
            text: text.to_string(),
            reason: format!("`{value}` is not a number"),
        })
}

/// Serialized form: a bare number or expression text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ExpressionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<ExpressionRepr> for Expression {
    type Error = ExpressionError;

    fn try_from(repr: ExpressionRepr) -> Result<Self, Self::Error> {
        match repr {
            ExpressionRepr::Number(value) => Ok(Self::Literal(value)),
            ExpressionRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Expression> for ExpressionRepr {
    fn from(expression: Expression) -> Self {
        match expression {
            Expression::Literal(value) => Self::Number(value),
            other => Self::Text(other.to_string()),
        }
    }
}
