use fluids_input::{CameraChannel, CameraEffect, InputState, KeyMap};
use fluids_math::{Axis, Matrix4f};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Returned when camera parameters would make the projection non-finite.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("clip planes must be finite and distinct, got near={near} far={far}")]
    InvalidClipRange { near: f32, far: f32 },
}

/// Initial camera state and rates, as read from a session config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Euler angles in radians about X, Y and Z.
    pub rotation: Vec3,
    /// Full vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second applied to position channels.
    pub move_speed: f32,
    /// Radians per second applied to rotation channels.
    pub turn_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.5),
            rotation: Vec3::ZERO,
            fov: 1.5,
            near: 0.1,
            far: 200.0,
            move_speed: 1.0,
            turn_speed: 1.0,
        }
    }
}

/// Camera with a position, Euler rotation and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraConfig {
    /// Check the `perspective` precondition on the clip planes.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.near.is_finite() && self.far.is_finite()) || self.near == self.far {
            return Err(CameraError::InvalidClipRange {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            rotation: config.rotation,
            fov: config.fov,
            near: config.near,
            far: config.far,
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
        }
    }

    /// Current state as a config, e.g. to persist where a session ended.
    pub fn to_config(&self) -> CameraConfig {
        CameraConfig {
            position: self.position,
            rotation: self.rotation,
            fov: self.fov,
            near: self.near,
            far: self.far,
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
        }
    }

    /// Advance the camera by `delta` seconds of held input.
    ///
    /// Every binding in `keymap` whose key is held in `input` moves its
    /// channel by `rate * delta`. Effects of several held keys add up.
    pub fn move_with(&mut self, input: &InputState, keymap: &KeyMap, delta: f32) {
        let mut applied = 0usize;
        for effect in keymap.effects_for(input) {
            self.apply(effect, delta);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(
                applied,
                delta,
                position = ?self.position,
                rotation = ?self.rotation,
                "camera moved"
            );
        }
    }

    /// Apply one effect for `delta` seconds.
    pub fn apply(&mut self, effect: CameraEffect, delta: f32) {
        let (target, rate) = if effect.channel.is_rotation() {
            (&mut self.rotation, self.turn_speed)
        } else {
            (&mut self.position, self.move_speed)
        };
        target[effect.channel.component()] += effect.direction.sign() * rate * delta;
    }

    /// Read a single channel.
    pub fn channel(&self, channel: CameraChannel) -> f32 {
        if channel.is_rotation() {
            self.rotation[channel.component()]
        } else {
            self.position[channel.component()]
        }
    }

    /// Projection for a `width` x `height` viewport.
    ///
    /// Precondition: `height != 0` and `far != near`.
    pub fn projection(&self, width: u32, height: u32) -> Matrix4f {
        Matrix4f::perspective(width, height, self.near, self.far, self.fov)
    }

    /// Placement and orientation, without projection.
    pub fn view(&self) -> Matrix4f {
        Matrix4f::translation(self.position.x, self.position.y, self.position.z)
            .multiply(&Matrix4f::rotation(self.rotation.x, Axis::X))
            .multiply(&Matrix4f::rotation(self.rotation.y, Axis::Y))
            .multiply(&Matrix4f::rotation(self.rotation.z, Axis::Z))
    }

    /// The per-frame uniform: perspective · translation · Rx · Ry · Rz.
    ///
    /// Precondition: `height != 0` and `far != near`.
    pub fn transform(&self, width: u32, height: u32) -> Matrix4f {
        Matrix4f::identity()
            .multiply(&self.projection(width, height))
            .multiply(&Matrix4f::translation(
                self.position.x,
                self.position.y,
                self.position.z,
            ))
            .multiply(&Matrix4f::rotation(self.rotation.x, Axis::X))
            .multiply(&Matrix4f::rotation(self.rotation.y, Axis::Y))
            .multiply(&Matrix4f::rotation(self.rotation.z, Axis::Z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluids_input::{Direction, Key};

    const EPS: f32 = 1e-5;

    fn z_only_keymap() -> KeyMap {
        let mut map = KeyMap::empty();
        map.bind(Key::S, CameraEffect::increase(CameraChannel::PositionZ));
        map
    }

    #[test]
    fn default_camera_matches_original_programs() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(cam.rotation, Vec3::ZERO);
        assert_eq!(cam.fov, 1.5);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 200.0);
        assert_eq!(cam.move_speed, 1.0);
    }

    #[test]
    fn golden_transform() {
        let cam = Camera::default();
        let m = cam.transform(500, 500);

        let tan_fov = (1.5_f32 / 2.0).tan();
        let (near, far) = (0.1_f32, 200.0_f32);
        let zz = (-near - far) / (far - near);
        let zw = 2.0 * far * near / (far - near);
        let expected = Matrix4f::from_rows([
            [1.0 / tan_fov, 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_fov, 0.0, 0.0],
            [0.0, 0.0, zz, zz * 2.5 + zw],
            [0.0, 0.0, 1.0, 2.5],
        ]);
        assert!(m.approx_eq(&expected, EPS), "{m}");

        // Same values, written out.
        assert!((m.data[0][0] - 1.073_426_1).abs() < EPS);
        assert!((m.data[1][1] - 1.073_426_1).abs() < EPS);
        assert!((m.data[2][2] + 1.001_000_5).abs() < EPS);
        assert!((m.data[2][3] + 2.302_401_2).abs() < EPS);
        assert_eq!(m.data[3][2], 1.0);
        assert_eq!(m.data[3][3], 2.5);
    }

    #[test]
    fn transform_is_deterministic() {
        let cam = Camera::default();
        assert_eq!(cam.transform(500, 500), cam.transform(500, 500));
    }

    #[test]
    fn transform_equals_projection_times_view() {
        let mut cam = Camera::default();
        cam.rotation = Vec3::new(0.3, -0.7, 1.1);
        cam.position = Vec3::new(1.0, -2.0, 4.0);
        let split = cam.projection(640, 480).multiply(&cam.view());
        assert!(cam.transform(640, 480).approx_eq(&split, 1e-4));
    }

    #[test]
    fn composition_order_rotates_before_translating() {
        let mut cam = Camera::default();
        cam.position = Vec3::new(5.0, 0.0, 0.0);
        cam.rotation = Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);

        // Rz first turns +x into +y, then the translation adds x = 5.
        let v = cam.view().transform_vector([1.0, 0.0, 0.0, 1.0]);
        assert!((v[0] - 5.0).abs() < EPS);
        assert!((v[1] - 1.0).abs() < EPS);
    }

    #[test]
    fn move_increases_z_by_rate_times_delta() {
        let mut cam = Camera::default();
        let map = z_only_keymap();
        let start = cam.position.z;

        cam.move_with(&InputState::with_keys([Key::S]), &map, 0.5);
        assert_eq!(cam.position.z, start + 0.5);

        let after = cam;
        cam.move_with(&InputState::new(), &map, 0.5);
        assert_eq!(cam, after);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut cam = Camera::default();
        let before = cam;
        cam.move_with(&InputState::with_keys([Key::Z, Key::Enter]), &KeyMap::orbit(), 1.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn held_keys_apply_additively() {
        let mut cam = Camera::default();
        let mut map = KeyMap::empty();
        map.bind(Key::W, CameraEffect::increase(CameraChannel::PositionZ));
        map.bind(Key::S, CameraEffect::increase(CameraChannel::PositionZ));
        map.bind(Key::Right, CameraEffect::increase(CameraChannel::RotationY));

        let input = InputState::with_keys([Key::W, Key::S, Key::Right]);
        cam.move_with(&input, &map, 0.25);
        assert!((cam.position.z - 3.0).abs() < EPS);
        assert!((cam.rotation.y - 0.25).abs() < EPS);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = Camera::default();
        let input = InputState::with_keys([Key::W, Key::S]);
        cam.move_with(&input, &KeyMap::orbit(), 0.75);
        assert!((cam.position.z - 2.5).abs() < EPS);
    }

    #[test]
    fn rotation_uses_turn_speed() {
        let mut cam = Camera::default();
        cam.turn_speed = 2.0;
        cam.move_speed = 10.0;
        cam.apply(
            CameraEffect::new(CameraChannel::RotationX, Direction::Decrease),
            0.5,
        );
        assert_eq!(cam.rotation.x, -1.0);
        assert_eq!(cam.channel(CameraChannel::RotationX), -1.0);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut cam = Camera::default();
        let before = cam;
        cam.move_with(&InputState::with_keys([Key::W, Key::Up]), &KeyMap::orbit(), 0.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn config_round_trip() {
        let mut cam = Camera::default();
        cam.position.x = 3.0;
        assert_eq!(Camera::from_config(&cam.to_config()), cam);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
    }

    #[test]
    fn coincident_or_non_finite_clip_planes_are_rejected() {
        let same = CameraConfig {
            near: 1.0,
            far: 1.0,
            ..CameraConfig::default()
        };
        assert_eq!(
            same.validate(),
            Err(CameraError::InvalidClipRange {
                near: 1.0,
                far: 1.0
            })
        );
        // The projection for such a camera is all NaN.
        assert!(!Camera::from_config(&same).transform(500, 500).is_finite());

        let infinite = CameraConfig {
            far: f32::INFINITY,
            ..CameraConfig::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: CameraConfig = serde_yaml::from_str("fov: 1.0\n").unwrap();
        assert_eq!(config.fov, 1.0);
        assert_eq!(config.far, 200.0);
        assert_eq!(config.position, Vec3::new(0.0, 0.0, 2.5));
    }
}
