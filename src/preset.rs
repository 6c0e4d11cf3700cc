use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

#[inline]
#[must_use]
pub const fn full_volume() -> f32 {
    100.0
}

/// a single sound of a preset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PresetSound {
    pub path: PathBuf,
    /// 0 to 100
    #[serde(default = "full_volume")]
    pub volume: f32,
}

impl PresetSound {
    #[must_use]
    pub const fn new(path: PathBuf, volume: f32) -> Self {
        Self { path, volume }
    }
}

/// a named combination of sounds, the name is what a timer refers to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub sounds: Vec<PresetSound>,
}

impl Preset {
    #[must_use]
    pub fn new(name: impl Into<String>, sounds: Vec<PresetSound>) -> Self {
        Self {
            name: name.into(),
            sounds,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} sounds)", self.name, self.sounds.len())
    }
}

/// the preset catalogue as seen by the timer
pub trait PresetStore {
    fn find_by_name(&self, name: &str) -> Option<&Preset>;

    /// in the order the catalogue keeps them
    fn list_all(&self) -> &[Preset];
}

impl PresetStore for [Preset] {
    fn find_by_name(&self, name: &str) -> Option<&Preset> {
        self.iter().find(|preset| preset.name == name)
    }

    fn list_all(&self) -> &[Preset] {
        self
    }
}

impl PresetStore for Vec<Preset> {
    fn find_by_name(&self, name: &str) -> Option<&Preset> {
        self.as_slice().find_by_name(name)
    }

    fn list_all(&self) -> &[Preset] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_by_name_is_exact() {
        let presets = vec![Preset::new("test-1", vec![]), Preset::new("test-2", vec![])];
        assert_eq!(presets.find_by_name("test-2").map(Preset::name), Some("test-2"));
        assert!(presets.find_by_name("test").is_none());
        assert!(presets.find_by_name("TEST-1").is_none());
    }

    #[test]
    fn list_all_keeps_order() {
        let presets = vec![Preset::new("b", vec![]), Preset::new("a", vec![])];
        let names: Vec<_> = presets.list_all().iter().map(Preset::name).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn volume_defaults_to_full() {
        let preset: Preset = toml::from_str(
            r#"
            name = "rain"
            [[sounds]]
            path = "rain.mp3"
            "#,
        )
        .unwrap();
        assert_eq!(preset.sounds[0].volume, 100.0);
    }
}
