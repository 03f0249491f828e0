use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{WdlError, WdlResult};

/// A 3D vector. Used for positions, Euler rotations (degrees), scales,
/// and gravity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// The all-ones vector (the default scale).
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An RGBA color. Every channel lies in `[0, 1]`; out-of-range channels
/// are a construction error, enforced both by [`Color::new`] and by
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque white, the default for materials and lights.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a color, rejecting any channel outside `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> WdlResult<Self> {
        for (field, value) in [("r", r), ("g", g), ("b", b), ("a", a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WdlError::OutOfRange {
                    field,
                    value: f64::from(value),
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(Self { r, g, b, a })
    }

    /// Create an opaque color, rejecting any channel outside `[0, 1]`.
    pub fn rgb(r: f32, g: f32, b: f32) -> WdlResult<Self> {
        Self::new(r, g, b, 1.0)
    }

    /// An opaque grey with the given level on all three channels.
    ///
    /// Only meaningful for levels in `[0, 1]`; used for the environment
    /// defaults, which are all in range by construction.
    pub(crate) const fn grey(level: f32) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Wire shape for [`Color`]: channels default to 1.0 when omitted and are
/// range-checked on the way in.
#[derive(Deserialize)]
struct ColorRepr {
    #[serde(default = "one")]
    r: f32,
    #[serde(default = "one")]
    g: f32,
    #[serde(default = "one")]
    b: f32,
    #[serde(default = "one")]
    a: f32,
}

fn one() -> f32 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = WdlError;

    fn try_from(repr: ColorRepr) -> WdlResult<Self> {
        Self::new(repr.r, repr.g, repr.b, repr.a)
    }
}

/// Spatial transformation for entities and lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vector3,
    /// Euler rotation in degrees.
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            scale: Vector3::ONE,
        }
    }
}

impl Transform {
    /// A transform at the given position with default rotation and scale.
    pub fn at(position: Vector3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Replace the scale, keeping position and rotation.
    pub fn scaled(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the rotation, keeping position and scale.
    pub fn rotated(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_has_unit_scale() {
        let t = Transform::default();
        assert_eq!(t.position, Vector3::ZERO);
        assert_eq!(t.rotation, Vector3::ZERO);
        assert_eq!(t.scale, Vector3::ONE);
    }

    #[test]
    fn color_rejects_out_of_range_channel() {
        assert!(Color::new(1.2, 0.0, 0.0, 1.0).is_err());
        assert!(Color::new(0.5, -0.1, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn color_deserialization_enforces_range() {
        let err = serde_json::from_str::<Color>(r#"{"r": 2.0, "g": 0.0, "b": 0.0, "a": 1.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn color_channels_default_to_one() {
        let color: Color = serde_json::from_str(r#"{"r": 0.25}"#).unwrap();
        assert_eq!(color.g, 1.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn vector_round_trips() {
        let v = Vector3::new(1.5, -2.0, 3.25);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vector3 = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
