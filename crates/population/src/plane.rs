//! Named reference planes.

use nalgebra::Vector3;
use orbit::{OrbitError, ReferencePlane};
use serde::{Deserialize, Serialize};

/// How a reference plane is specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneOrientation {
    /// Ascending node, inclination and argument, all in degrees
    Angles { lan: f64, inc: f64, ape: f64 },

    /// Pole direction and a reference direction for the plane's +x axis
    Vectors {
        normal: [f64; 3],
        reference: [f64; 3],
    },
}

/// A named frame that population orbits are drawn in before being rotated
/// into the central body's base frame.
///
/// ```toml
/// [[reference_planes]]
/// name = "retrograde"
/// angles = { lan = 0, inc = 180, ape = 0 }
///
/// [[reference_planes]]
/// name = "tilted"
/// normal = [0, -1, 1]
/// reference = [1, 0, 0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaneRepr", into = "PlaneRepr")]
pub struct ReferencePlaneDef {
    pub name: String,
    pub orientation: PlaneOrientation,
}

impl ReferencePlaneDef {
    pub fn from_angles(name: impl Into<String>, lan: f64, inc: f64, ape: f64) -> Self {
        Self {
            name: name.into(),
            orientation: PlaneOrientation::Angles { lan, inc, ape },
        }
    }

    pub fn from_vectors(name: impl Into<String>, normal: [f64; 3], reference: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            orientation: PlaneOrientation::Vectors { normal, reference },
        }
    }

    /// Build the rotation this definition describes.
    pub fn to_reference_plane(&self) -> Result<ReferencePlane, OrbitError> {
        match &self.orientation {
            PlaneOrientation::Angles { lan, inc, ape } => Ok(ReferencePlane::from_angles(
                lan.to_radians(),
                inc.to_radians(),
                ape.to_radians(),
            )),
            PlaneOrientation::Vectors { normal, reference } => ReferencePlane::from_vectors(
                &Vector3::from(*normal),
                &Vector3::from(*reference),
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaneRepr {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angles: Option<AnglesRepr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnglesRepr {
    #[serde(default)]
    lan: f64,
    #[serde(default)]
    inc: f64,
    #[serde(default)]
    ape: f64,
}

impl TryFrom<PlaneRepr> for ReferencePlaneDef {
    type Error = String;

    fn try_from(repr: PlaneRepr) -> Result<Self, Self::Error> {
        let orientation = match (repr.angles, repr.normal, repr.reference) {
            (Some(a), None, None) => PlaneOrientation::Angles {
                lan: a.lan,
                inc: a.inc,
                ape: a.ape,
            },
            (None, Some(normal), Some(reference)) => PlaneOrientation::Vectors { normal, reference },
            _ => {
                return Err(format!(
                    "reference plane `{}` needs either `angles` or both `normal` and `reference`",
                    repr.name
                ))
            }
        };
        Ok(Self {
            name: repr.name,
            orientation,
        })
    }
}

impl From<ReferencePlaneDef> for PlaneRepr {
    fn from(def: ReferencePlaneDef) -> Self {
        let mut repr = PlaneRepr {
            name: def.name,
            ..Default::default()
        };
        match def.orientation {
            PlaneOrientation::Angles { lan, inc, ape } => {
                repr.angles = Some(AnglesRepr { lan, inc, ape });
            }
            PlaneOrientation::Vectors { normal, reference } => {
                repr.normal = Some(normal);
                repr.reference = Some(reference);
            }
        }
        repr
    }
}
