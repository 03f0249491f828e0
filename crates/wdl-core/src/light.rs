use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{Color, Transform};

/// The kind of a light source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Parallel rays from an infinitely distant source (a sun).
    Directional,
    /// Omnidirectional from a point.
    #[default]
    Point,
    /// A cone from a point.
    Spot,
    /// Emission from a rectangular surface.
    Area,
    /// Uniform, directionless fill light.
    Ambient,
}

impl LightKind {
    /// All kinds, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Directional,
        Self::Point,
        Self::Spot,
        Self::Area,
        Self::Ambient,
    ];

    /// Parse a tag into a kind; unrecognized tags fall back to
    /// [`LightKind::Point`].
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .unwrap_or_default()
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Directional => "directional",
            Self::Point => "point",
            Self::Spot => "spot",
            Self::Area => "area",
            Self::Ambient => "ambient",
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A light source placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub name: String,
    #[serde(rename = "light_type", default)]
    pub kind: LightKind,
    #[serde(default)]
    pub color: Color,
    /// Brightness, `>= 0`. Values above 100 are flagged as suspicious by
    /// the validator but are not rejected here.
    #[serde(
        default = "default_intensity",
        deserialize_with = "crate::check::non_negative_f32"
    )]
    pub intensity: f32,
    /// Effective range for point and spot lights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
    /// Cone angle in degrees for spot lights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_angle: Option<f64>,
    #[serde(default = "default_true")]
    pub cast_shadows: bool,
    #[serde(default)]
    pub transform: Transform,
}

fn default_intensity() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Light {
    /// Create a light with default color, unit intensity, and shadows on.
    pub fn new(kind: LightKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            color: Color::default(),
            intensity: default_intensity(),
            range: None,
            spot_angle: None,
            cast_shadows: true,
            transform: Transform::default(),
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the intensity.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Replace the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let light = Light::new(LightKind::Point, "Lamp");
        assert_eq!(light.intensity, 1.0);
        assert!(light.cast_shadows);
        assert!(light.range.is_none());
    }

    #[test]
    fn kind_fallback_is_point() {
        assert_eq!(LightKind::parse("directional"), LightKind::Directional);
        assert_eq!(LightKind::parse("laser"), LightKind::Point);
    }

    #[test]
    fn negative_intensity_rejected_on_deserialize() {
        let json = r#"{"name": "Bad", "intensity": -1.0}"#;
        assert!(serde_json::from_str::<Light>(json).is_err());
    }

    #[test]
    fn omitted_fields_take_defaults_on_deserialize() {
        let light: Light = serde_json::from_str(r#"{"name": "Minimal"}"#).unwrap();
        assert_eq!(light.kind, LightKind::Point);
        assert_eq!(light.intensity, 1.0);
        assert!(light.cast_shadows);
    }
}
