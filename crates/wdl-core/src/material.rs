use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{WdlError, WdlResult};
use crate::math::Color;

/// Shading model for a material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Standard,
    Pbr,
    Unlit,
    Transparent,
    Emissive,
}

impl MaterialKind {
    /// Parse a tag into a kind. Unrecognized tags fall back to
    /// [`MaterialKind::Standard`]; strict rejection happens only on the
    /// canonical deserialization path.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "pbr" => Self::Pbr,
            "unlit" => Self::Unlit,
            "transparent" => Self::Transparent,
            "emissive" => Self::Emissive,
            _ => Self::Standard,
        }
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Pbr => "pbr",
            Self::Unlit => "unlit",
            Self::Transparent => "transparent",
            Self::Emissive => "emissive",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Visual appearance of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    #[serde(rename = "material_type", default)]
    pub kind: MaterialKind,
    #[serde(default)]
    pub base_color: Color,
    /// Metalness in `[0, 1]`.
    #[serde(default, deserialize_with = "crate::check::unit_f32")]
    pub metallic: f32,
    /// Surface roughness in `[0, 1]`.
    #[serde(
        default = "default_roughness",
        deserialize_with = "crate::check::unit_f32"
    )]
    pub roughness: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission_color: Option<Color>,
    #[serde(default, deserialize_with = "crate::check::non_negative_f32")]
    pub emission_strength: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_map_path: Option<String>,
}

fn default_roughness() -> f32 {
    0.5
}

impl Material {
    /// A standard material with the given name and all other fields at
    /// their defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::default(),
            base_color: Color::default(),
            metallic: 0.0,
            roughness: default_roughness(),
            emission_color: None,
            emission_strength: 0.0,
            texture_path: None,
            normal_map_path: None,
        }
    }

    /// Set the shading model.
    pub fn with_kind(mut self, kind: MaterialKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the base color.
    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// Set metalness and roughness, rejecting values outside `[0, 1]`.
    pub fn with_surface(mut self, metallic: f32, roughness: f32) -> WdlResult<Self> {
        for (field, value) in [("metallic", metallic), ("roughness", roughness)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WdlError::OutOfRange {
                    field,
                    value: f64::from(value),
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        self.metallic = metallic;
        self.roughness = roughness;
        Ok(self)
    }

    /// Set the diffuse texture path.
    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let m = Material::new("Stone");
        assert_eq!(m.kind, MaterialKind::Standard);
        assert_eq!(m.metallic, 0.0);
        assert_eq!(m.roughness, 0.5);
        assert_eq!(m.emission_strength, 0.0);
        assert!(m.emission_color.is_none());
    }

    #[test]
    fn unknown_tag_falls_back_to_standard() {
        assert_eq!(MaterialKind::parse("pbr"), MaterialKind::Pbr);
        assert_eq!(MaterialKind::parse("holographic"), MaterialKind::Standard);
    }

    #[test]
    fn strict_deserialization_rejects_unknown_tag() {
        let json = r#"{"name": "X", "material_type": "holographic"}"#;
        assert!(serde_json::from_str::<Material>(json).is_err());
    }

    #[test]
    fn out_of_range_roughness_rejected() {
        let json = r#"{"name": "X", "roughness": 1.5}"#;
        assert!(serde_json::from_str::<Material>(json).is_err());
        assert!(Material::new("X").with_surface(0.2, 2.0).is_err());
    }
}
