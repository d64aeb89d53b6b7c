//! Distribution specs whose parameters may reference celestial bodies.

use celestial::{BodyTable, Expression, ValueContext};
use rand::Rng;
use sampling::{Distribution, Family, SamplingError};
use serde::{Deserialize, Serialize};

use crate::error::DistributionError;

/// Parameters of a [`DistributionSpec`].
#[derive(Debug, Clone, PartialEq)]
pub enum Parameters {
    /// Bounds for Uniform, LogUniform and Isotropic
    Range { min: Expression, max: Expression },

    /// Centre and spread for Gaussian, LogNormal, Beta and Rayleigh.
    /// The spread is a plain scale, never a body reference.
    Moments { avg: Expression, stddev: f64 },
}

/// A distribution family with symbolic parameters.
///
/// Resolved against the current [`BodyTable`] on every draw. In TOML a spec
/// is either a single value (a constant) or a table:
///
/// ```toml
/// eccentricity = 0.1
/// size = { type = "LogUniform", min = "Ratio(Kerbin.sma, 0.5)", max = 2e10 }
/// inclination = { type = "Rayleigh", avg = 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionRepr", into = "DistributionRepr")]
pub struct DistributionSpec {
    family: Family,
    parameters: Parameters,
}

impl DistributionSpec {
    /// Always yields `value`; shorthand for `Uniform(value, value)`.
    pub fn constant(value: impl Into<Expression>) -> Self {
        let value = value.into();
        Self {
            family: Family::Uniform,
            parameters: Parameters::Range {
                min: value.clone(),
                max: value,
            },
        }
    }

    pub fn uniform(min: impl Into<Expression>, max: impl Into<Expression>) -> Self {
        Self {
            family: Family::Uniform,
            parameters: Parameters::Range {
                min: min.into(),
                max: max.into(),
            },
        }
    }

    /// Full-sphere isotropic inclination, 0 to 180 degrees.
    pub fn isotropic() -> Self {
        Self {
            family: Family::Isotropic,
            parameters: Parameters::Range {
                min: Expression::Literal(0.0),
                max: Expression::Literal(180.0),
            },
        }
    }

    /// A range family with bounds `min` and `max`.
    pub fn range(
        family: Family,
        min: impl Into<Expression>,
        max: impl Into<Expression>,
    ) -> Result<Self, DistributionError> {
        if !family.is_range() {
            return Err(DistributionError::MissingParameter {
                family,
                parameter: "avg",
            });
        }
        let spec = Self {
            family,
            parameters: Parameters::Range {
                min: min.into(),
                max: max.into(),
            },
        };
        spec.check_literals()?;
        Ok(spec)
    }

    /// A moment family centred on `avg`.
    pub fn moments(
        family: Family,
        avg: impl Into<Expression>,
        stddev: f64,
    ) -> Result<Self, DistributionError> {
        if family.is_range() {
            return Err(DistributionError::MissingParameter {
                family,
                parameter: "min",
            });
        }
        if !stddev.is_finite() || stddev < 0.0 {
            return Err(SamplingError::InvalidDistributionParameters(format!(
                "standard deviation {stddev} must be finite and non-negative"
            ))
            .into());
        }
        let spec = Self {
            family,
            parameters: Parameters::Moments {
                avg: avg.into(),
                stddev,
            },
        };
        spec.check_literals()?;
        Ok(spec)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Bodies referenced by the parameters.
    pub fn bodies(&self) -> impl Iterator<Item = &str> {
        let (a, b) = match &self.parameters {
            Parameters::Range { min, max } => (min.body(), max.body()),
            Parameters::Moments { avg, .. } => (avg.body(), None),
        };
        a.into_iter().chain(b)
    }

    /// Largest value a draw can produce, when known without a body table.
    ///
    /// `None` for symbolic bounds and for families without a finite maximum.
    pub fn literal_upper_bound(&self) -> Option<f64> {
        match &self.parameters {
            Parameters::Range { max, .. } => max.as_literal(),
            Parameters::Moments { avg, stddev }
                if *stddev == 0.0 && self.family != Family::Rayleigh =>
            {
                avg.as_literal()
            }
            Parameters::Moments { .. } => None,
        }
    }

    /// Resolve the parameters into a concrete, validated distribution.
    ///
    /// In an angle context a Uniform range whose upper bound resolves below
    /// its lower bound wraps through 360; draws from it may exceed 360.
    pub fn resolve(
        &self,
        table: &BodyTable,
        context: ValueContext,
    ) -> Result<Distribution, DistributionError> {
        let distribution = match &self.parameters {
            Parameters::Range { min, max } => {
                let min = min.resolve(table, context)?;
                let mut max = max.resolve(table, context)?;
                // An angular range may cross 0, e.g. Offset(X.mnl, -10) to Offset(X.mnl, 10)
                if context == ValueContext::Angle && self.family == Family::Uniform && max < min {
                    max += 360.0;
                }
                Distribution::from_family(self.family, min, max)
            }
            Parameters::Moments { avg, stddev } => {
                Distribution::from_family(self.family, avg.resolve(table, context)?, *stddev)
            }
        };
        distribution.validate()?;
        Ok(distribution)
    }

    /// Resolve against `table` and draw one value.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        table: &BodyTable,
        context: ValueContext,
    ) -> Result<f64, DistributionError> {
        Ok(self.resolve(table, context)?.sample(rng)?)
    }

    /// Validate early when every parameter is a literal.
    fn check_literals(&self) -> Result<(), DistributionError> {
        let literal = match &self.parameters {
            Parameters::Range { min, max } => min
                .as_literal()
                .zip(max.as_literal())
                .map(|(min, max)| Distribution::from_family(self.family, min, max)),
            Parameters::Moments { avg, stddev } => avg
                .as_literal()
                .map(|avg| Distribution::from_family(self.family, avg, *stddev)),
        };
        if let Some(distribution) = literal {
            distribution.validate()?;
        }
        Ok(())
    }
}

impl From<f64> for DistributionSpec {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

// =============================================================================
// Serialized form
// =============================================================================

/// A single configuration value: number or expression text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn into_expression(self) -> Result<Expression, DistributionError> {
        match self {
            Self::Number(value) => Ok(Expression::Literal(value)),
            Self::Text(text) => Ok(text.parse()?),
        }
    }
}

impl From<Expression> for Scalar {
    fn from(expression: Expression) -> Self {
        match expression {
            Expression::Literal(value) => Self::Number(value),
            other => Self::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DistributionRepr {
    Constant(Scalar),
    Full(FullRepr),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FullRepr {
    #[serde(rename = "type", default = "default_family")]
    family: Family,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avg: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stddev: Option<f64>,
}

fn default_family() -> Family {
    Family::Uniform
}

impl TryFrom<DistributionRepr> for DistributionSpec {
    type Error = DistributionError;

    fn try_from(repr: DistributionRepr) -> Result<Self, Self::Error> {
        let full = match repr {
            DistributionRepr::Constant(value) => {
                return Ok(Self::constant(value.into_expression()?));
            }
            DistributionRepr::Full(full) => full,
        };
        let family = full.family;

        let unexpected = |parameter| DistributionError::UnexpectedParameter { family, parameter };
        let missing = |parameter| DistributionError::MissingParameter { family, parameter };

        if family.is_range() {
            if full.avg.is_some() {
                return Err(unexpected("avg"));
            }
            if full.stddev.is_some() {
                return Err(unexpected("stddev"));
            }
            let (min, max) = match (family, full.min, full.max) {
                (_, Some(min), Some(max)) => (min.into_expression()?, max.into_expression()?),
                (Family::Isotropic, min, max) => (
                    min.map_or(Ok(Expression::Literal(0.0)), Scalar::into_expression)?,
                    max.map_or(Ok(Expression::Literal(180.0)), Scalar::into_expression)?,
                ),
                (_, None, _) => return Err(missing("min")),
                (_, _, None) => return Err(missing("max")),
            };
            Self::range(family, min, max)
        } else {
            if full.min.is_some() {
                return Err(unexpected("min"));
            }
            if full.max.is_some() {
                return Err(unexpected("max"));
            }
            let avg = full.avg.ok_or_else(|| missing("avg"))?.into_expression()?;
            Self::moments(family, avg, full.stddev.unwrap_or(0.0))
        }
    }
}

impl From<DistributionSpec> for DistributionRepr {
    fn from(spec: DistributionSpec) -> Self {
        let mut full = FullRepr {
            family: spec.family,
            min: None,
            max: None,
            avg: None,
            stddev: None,
        };
        match spec.parameters {
            Parameters::Range { min, max } => {
                full.min = Some(min.into());
                full.max = Some(max.into());
            }
            Parameters::Moments { avg, stddev } => {
                full.avg = Some(avg.into());
                full.stddev = Some(stddev);
            }
        }
        Self::Full(full)
    }
}
