use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::{Color, Vector3};

/// Weather condition for the whole world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
}

impl Weather {
    /// All conditions, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Clear,
        Self::Cloudy,
        Self::Rainy,
        Self::Stormy,
        Self::Snowy,
        Self::Foggy,
    ];

    /// Parse a tag into a condition; unrecognized tags fall back to
    /// [`Weather::Clear`].
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|weather| weather.as_tag() == tag)
            .unwrap_or_default()
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Snowy => "snowy",
            Self::Foggy => "foggy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Time-of-day configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDay {
    /// Hour of day in `[0, 23]`.
    #[serde(deserialize_with = "crate::check::hour")]
    pub hour: u8,
    /// Minute of hour in `[0, 59]`.
    #[serde(deserialize_with = "crate::check::minute")]
    pub minute: u8,
    pub day_night_cycle: bool,
    /// Length of a full day/night cycle, `>= 0` seconds.
    #[serde(deserialize_with = "crate::check::non_negative_f64")]
    pub cycle_duration_seconds: f64,
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
            day_night_cycle: false,
            cycle_duration_seconds: 3600.0,
        }
    }
}

impl TimeOfDay {
    /// A fixed time of day with no cycle.
    pub fn fixed(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            ..Self::default()
        }
    }
}

/// Skybox configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skybox {
    pub skybox_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_path: Option<String>,
    pub tint_color: Color,
    /// Exposure multiplier, `>= 0`.
    #[serde(deserialize_with = "crate::check::non_negative_f32")]
    pub exposure: f32,
    /// Rotation around the vertical axis, in degrees.
    pub rotation: f64,
}

impl Default for Skybox {
    fn default() -> Self {
        Self {
            skybox_type: "procedural".to_string(),
            texture_path: None,
            tint_color: Color::WHITE,
            exposure: 1.0,
            rotation: 0.0,
        }
    }
}

/// World-level environment settings: weather, time, fog, sky, gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    pub ambient_light: Color,
    pub fog_enabled: bool,
    pub fog_color: Color,
    /// Fog density in `[0, 1]`.
    #[serde(deserialize_with = "crate::check::unit_f32")]
    pub fog_density: f32,
    pub skybox: Skybox,
    pub gravity: Vector3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_reverb_preset: Option<String>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            weather: Weather::Clear,
            time_of_day: TimeOfDay::default(),
            ambient_light: Color::grey(0.2),
            fog_enabled: false,
            fog_color: Color::grey(0.5),
            fog_density: 0.01,
            skybox: Skybox::default(),
            gravity: Vector3::new(0.0, -9.81, 0.0),
            audio_reverb_preset: None,
        }
    }
}
