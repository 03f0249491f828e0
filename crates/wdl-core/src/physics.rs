use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Vector3;

/// Physics configuration for an entity.
///
/// Disabled by default; a default-constructed settings block describes a
/// unit-mass body that collides but does not simulate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub enabled: bool,
    pub is_kinematic: bool,
    /// Mass in kilograms, `>= 0`.
    #[serde(deserialize_with = "crate::check::non_negative_f32")]
    pub mass: f32,
    #[serde(deserialize_with = "crate::check::non_negative_f32")]
    pub drag: f32,
    #[serde(deserialize_with = "crate::check::non_negative_f32")]
    pub angular_drag: f32,
    pub use_gravity: bool,
    pub collision_enabled: bool,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            is_kinematic: false,
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: true,
            collision_enabled: true,
        }
    }
}

impl PhysicsSettings {
    /// Settings for a simulated dynamic body with the given mass.
    pub fn dynamic(mass: f32) -> Self {
        Self {
            enabled: true,
            mass,
            ..Self::default()
        }
    }
}

/// Collision shape primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderShape {
    #[default]
    Box,
    Sphere,
    Capsule,
    Mesh,
    Convex,
}

impl ColliderShape {
    /// Parse a tag into a shape; unrecognized tags fall back to
    /// [`ColliderShape::Box`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "sphere" => Self::Sphere,
            "capsule" => Self::Capsule,
            "mesh" => Self::Mesh,
            "convex" => Self::Convex,
            _ => Self::Box,
        }
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Capsule => "capsule",
            Self::Mesh => "mesh",
            Self::Convex => "convex",
        }
    }
}

impl fmt::Display for ColliderShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Collision volume attached to an entity, local to its transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collider {
    #[serde(rename = "collider_type")]
    pub shape: ColliderShape,
    pub is_trigger: bool,
    pub center: Vector3,
    pub size: Vector3,
    /// Radius for sphere and capsule shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Height for capsule shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            shape: ColliderShape::Box,
            is_trigger: false,
            center: Vector3::ZERO,
            size: Vector3::ONE,
            radius: None,
            height: None,
        }
    }
}

impl Collider {
    /// A unit box collider.
    pub fn cube() -> Self {
        Self::default()
    }

    /// A sphere collider with the given radius.
    pub fn sphere(radius: f64) -> Self {
        Self {
            shape: ColliderShape::Sphere,
            radius: Some(radius),
            ..Self::default()
        }
    }

    /// A box-shaped trigger volume of the given size.
    pub fn trigger(size: Vector3) -> Self {
        Self {
            is_trigger: true,
            size,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_defaults() {
        let p = PhysicsSettings::default();
        assert!(!p.enabled);
        assert_eq!(p.mass, 1.0);
        assert_eq!(p.angular_drag, 0.05);
        assert!(p.use_gravity);
        assert!(p.collision_enabled);
    }

    #[test]
    fn negative_mass_rejected_on_deserialize() {
        let json = r#"{"enabled": true, "mass": -2.0}"#;
        assert!(serde_json::from_str::<PhysicsSettings>(json).is_err());
    }

    #[test]
    fn collider_shape_fallback() {
        assert_eq!(ColliderShape::parse("capsule"), ColliderShape::Capsule);
        assert_eq!(ColliderShape::parse("torus"), ColliderShape::Box);
    }

    #[test]
    fn sphere_collider_carries_radius() {
        let c = Collider::sphere(2.5);
        assert_eq!(c.shape, ColliderShape::Sphere);
        assert_eq!(c.radius, Some(2.5));
        assert!(c.height.is_none());
    }
}
