use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::key::{Key, ParseKeyError};
use crate::state::InputState;

/// A single scalar of camera state an input can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraChannel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
}

impl CameraChannel {
    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            CameraChannel::RotationX | CameraChannel::RotationY | CameraChannel::RotationZ
        )
    }

    /// Component index within the position or rotation vector (x=0, y=1, z=2).
    pub fn component(self) -> usize {
        match self {
            CameraChannel::PositionX | CameraChannel::RotationX => 0,
            CameraChannel::PositionY | CameraChannel::RotationY => 1,
            CameraChannel::PositionZ | CameraChannel::RotationZ => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Increase => 1.0,
            Direction::Decrease => -1.0,
        }
    }
}

/// What a held key does to the camera: push one channel up or down at the
/// camera's configured rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraEffect {
    pub channel: CameraChannel,
    pub direction: Direction,
}

impl CameraEffect {
    pub fn new(channel: CameraChannel, direction: Direction) -> Self {
        Self { channel, direction }
    }

    pub fn increase(channel: CameraChannel) -> Self {
        Self::new(channel, Direction::Increase)
    }

    pub fn decrease(channel: CameraChannel) -> Self {
        Self::new(channel, Direction::Decrease)
    }
}

/// One row of the keymap table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    #[serde(flatten)]
    pub effect: CameraEffect,
}

/// Built-in control schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// W/S dolly along z, arrows pitch and yaw, Q/E roll.
    Orbit,
    /// W/S along z, A/D along x, Q/E along y. No rotation.
    Planar,
}

impl KeymapPreset {
    pub const ALL: [KeymapPreset; 2] = [KeymapPreset::Orbit, KeymapPreset::Planar];

    pub fn name(self) -> &'static str {
        match self {
            KeymapPreset::Orbit => "orbit",
            KeymapPreset::Planar => "planar",
        }
    }
}

impl fmt::Display for KeymapPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeymapPreset {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbit" => Ok(KeymapPreset::Orbit),
            "planar" => Ok(KeymapPreset::Planar),
            _ => Err(KeymapError::UnknownPreset(s.to_string())),
        }
    }
}

/// Errors from building or loading a keymap.
#[derive(Debug, thiserror::Error)]
pub enum KeymapError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown keymap preset: {0:?} (expected orbit or planar)")]
    UnknownPreset(String),
    #[error(transparent)]
    Key(#[from] ParseKeyError),
}

fn default_quit_key() -> Option<Key> {
    Some(Key::Escape)
}

/// Ordered key → camera-effect table.
///
/// A key may appear in several rows; every row whose key is held fires, so
/// effects from simultaneously held keys add up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default)]
    bindings: Vec<KeyBinding>,
    /// Key that requests termination. `None` disables it.
    #[serde(default = "default_quit_key")]
    pub quit_key: Option<Key>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::orbit()
    }
}

impl KeyMap {
    /// An empty table with Escape as the quit key.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
            quit_key: default_quit_key(),
        }
    }

    pub fn preset(preset: KeymapPreset) -> Self {
        match preset {
            KeymapPreset::Orbit => Self::orbit(),
            KeymapPreset::Planar => Self::planar(),
        }
    }

    pub fn orbit() -> Self {
        use CameraChannel::*;
        let mut map = Self::empty();
        map.bind(Key::W, CameraEffect::decrease(PositionZ));
        map.bind(Key::S, CameraEffect::increase(PositionZ));
        map.bind(Key::Up, CameraEffect::decrease(RotationX));
        map.bind(Key::Down, CameraEffect::increase(RotationX));
        map.bind(Key::Left, CameraEffect::decrease(RotationY));
        map.bind(Key::Right, CameraEffect::increase(RotationY));
        map.bind(Key::Q, CameraEffect::decrease(RotationZ));
        map.bind(Key::E, CameraEffect::increase(RotationZ));
        map
    }

    pub fn planar() -> Self {
        use CameraChannel::*;
        let mut map = Self::empty();
        map.bind(Key::W, CameraEffect::decrease(PositionZ));
        map.bind(Key::S, CameraEffect::increase(PositionZ));
        map.bind(Key::A, CameraEffect::decrease(PositionX));
        map.bind(Key::D, CameraEffect::increase(PositionX));
        map.bind(Key::Q, CameraEffect::decrease(PositionY));
        map.bind(Key::E, CameraEffect::increase(PositionY));
        map
    }

    /// Append a binding.
    pub fn bind(&mut self, key: Key, effect: CameraEffect) {
        self.bindings.push(KeyBinding { key, effect });
    }

    /// Remove every binding for `key`. Returns how many were removed.
    pub fn unbind(&mut self, key: Key) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.key != key);
        before - self.bindings.len()
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Effects whose key is held in `input`, in table order.
    pub fn effects_for<'a>(
        &'a self,
        input: &'a InputState,
    ) -> impl Iterator<Item = CameraEffect> + 'a {
        self.bindings
            .iter()
            .filter(move |b| input.is_held(b.key))
            .map(|b| b.effect)
    }

    pub fn is_quit_key(&self, key: Key) -> bool {
        self.quit_key == Some(key)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, KeymapError> {
        let map: KeyMap = serde_yaml::from_str(yaml)?;
        tracing::debug!(bindings = map.bindings.len(), "keymap parsed");
        Ok(map)
    }

    pub fn to_yaml(&self) -> Result<String, KeymapError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a keymap table from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeymapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| KeymapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}

/// Keymap as written in a session config: either a preset name or a full table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeymapConfig {
    Preset(KeymapPreset),
    Table(KeyMap),
}

impl Default for KeymapConfig {
    fn default() -> Self {
        KeymapConfig::Preset(KeymapPreset::Orbit)
    }
}

impl KeymapConfig {
    pub fn resolve(&self) -> KeyMap {
        match self {
            KeymapConfig::Preset(preset) => KeyMap::preset(*preset),
            KeymapConfig::Table(map) => map.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn orbit_preset_drives_z_and_rotation() {
        let map = KeyMap::orbit();
        let input = InputState::with_keys([Key::W, Key::Left]);
        let effects: Vec<CameraEffect> = map.effects_for(&input).collect();
        assert_eq!(
            effects,
            vec![
                CameraEffect::decrease(CameraChannel::PositionZ),
                CameraEffect::decrease(CameraChannel::RotationY),
            ]
        );
    }

    #[test]
    fn planar_preset_has_no_rotation() {
        let map = KeyMap::planar();
        assert!(map.bindings().iter().all(|b| !b.effect.channel.is_rotation()));
        assert_eq!(map.bindings().len(), 6);
    }

    #[test]
    fn no_keys_held_yields_no_effects() {
        let map = KeyMap::orbit();
        assert_eq!(map.effects_for(&InputState::new()).count(), 0);
    }

    #[test]
    fn one_key_may_drive_several_channels() {
        let mut map = KeyMap::empty();
        map.bind(Key::Space, CameraEffect::increase(CameraChannel::PositionY));
        map.bind(Key::Space, CameraEffect::increase(CameraChannel::RotationX));
        let input = InputState::with_keys([Key::Space]);
        assert_eq!(map.effects_for(&input).count(), 2);
        assert_eq!(map.unbind(Key::Space), 2);
        assert!(map.is_empty());
    }

    #[test]
    fn channel_components() {
        assert_eq!(CameraChannel::PositionX.component(), 0);
        assert_eq!(CameraChannel::RotationY.component(), 1);
        assert_eq!(CameraChannel::PositionZ.component(), 2);
        assert!(CameraChannel::RotationZ.is_rotation());
        assert!(!CameraChannel::PositionY.is_rotation());
    }

    #[test]
    fn preset_parse() {
        assert_eq!("Orbit".parse::<KeymapPreset>().unwrap(), KeymapPreset::Orbit);
        assert_eq!("planar".parse::<KeymapPreset>().unwrap(), KeymapPreset::Planar);
        assert!(matches!(
            "wasd".parse::<KeymapPreset>(),
            Err(KeymapError::UnknownPreset(_))
        ));
    }

    #[test]
    fn yaml_table_parses_with_default_quit_key() {
        let yaml = r#"
bindings:
  - key: w
    channel: position_z
    direction: decrease
  - key: right
    channel: rotation_y
    direction: increase
"#;
        let map = KeyMap::from_yaml_str(yaml).unwrap();
        assert_eq!(map.bindings().len(), 2);
        assert_eq!(map.bindings()[1].key, Key::Right);
        assert_eq!(
            map.bindings()[1].effect,
            CameraEffect::increase(CameraChannel::RotationY)
        );
        assert!(map.is_quit_key(Key::Escape));
    }

    #[test]
    fn yaml_can_disable_quit_key() {
        let map = KeyMap::from_yaml_str("bindings: []\nquit_key: null\n").unwrap();
        assert_eq!(map.quit_key, None);
        assert!(!map.is_quit_key(Key::Escape));
    }

    #[test]
    fn yaml_round_trip_of_preset() {
        let map = KeyMap::planar();
        let yaml = map.to_yaml().unwrap();
        assert_eq!(KeyMap::from_yaml_str(&yaml).unwrap(), map);
    }

    #[test]
    fn bad_yaml_is_an_error() {
        let err = KeyMap::from_yaml_str("bindings:\n  - key: f13\n").unwrap_err();
        assert!(matches!(err, KeymapError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bindings:\n  - key: a\n    channel: position_x\n    direction: decrease"
        )
        .unwrap();
        let map = KeyMap::load(file.path()).unwrap();
        assert_eq!(map.bindings()[0].key, Key::A);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = KeyMap::load(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn keymap_config_accepts_preset_name_or_table() {
        let preset: KeymapConfig = serde_yaml::from_str("planar").unwrap();
        assert_eq!(preset.resolve(), KeyMap::planar());

        let table: KeymapConfig = serde_yaml::from_str(
            "bindings:\n  - key: e\n    channel: rotation_z\n    direction: increase\n",
        )
        .unwrap();
        assert_eq!(table.resolve().bindings().len(), 1);
    }
}
