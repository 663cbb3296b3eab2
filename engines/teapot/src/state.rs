use crate::{Action, Material, Teapot};
use glam::Vec3;
use lib_geometry::{Camera, CameraError, SpinningLight};
use log::{debug, info};
use teapot_framework::FrameControl;

/// Angle in degrees the camera and the lights move per frame after a reset.
pub const DEFAULT_ROTATION_DELTA: f32 = 1.0;

/// Bounds of the adjustable rotation delta in degrees.
pub const MIN_ROTATION_DELTA: f32 = 0.1;
pub const MAX_ROTATION_DELTA: f32 = 10.0;

/// Change of the rotation delta per frame while `=` or `-` is held.
pub const ROTATION_DELTA_STEP: f32 = 0.1;

/// Everything the frame composer needs to know about the scene.
///
/// The initial camera and lights are kept around to be able to reset them.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    camera: Camera,
    lights: [SpinningLight; 2],
    teapot: Teapot,
    /// in degrees
    rotation_delta: f32,
    initial_camera: Camera,
    initial_lights: [SpinningLight; 2],
}

impl SceneState {
    #[must_use]
    pub fn new(camera: Camera, lights: [SpinningLight; 2], teapot: Teapot) -> Self {
        Self {
            camera,
            lights,
            teapot,
            rotation_delta: DEFAULT_ROTATION_DELTA,
            initial_camera: camera,
            initial_lights: lights,
        }
    }

    /// The scene as it looks at startup: a camera 20 units in front of the teapot
    /// and two white lights above it, one in front and one behind.
    ///
    /// # Errors
    ///
    /// Fails only if the built-in camera parameters are out of range.
    pub fn initial() -> Result<Self, CameraError> {
        let center = Vec3::ZERO;
        let camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec3::Y, center, 45.0, 1.0, 100.0)?;
        let lights = [
            SpinningLight::new(Vec3::ONE, Vec3::new(0.0, 50.0, 50.0), center),
            SpinningLight::new(Vec3::ONE, Vec3::new(0.0, 50.0, -50.0), center),
        ];
        let teapot = Teapot::new(center, 1.0, Material::default());

        Ok(Self::new(camera, lights, teapot))
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn lights(&self) -> &[SpinningLight; 2] {
        &self.lights
    }

    #[must_use]
    pub fn teapot(&self) -> &Teapot {
        &self.teapot
    }

    /// Current step size of all rotations in degrees.
    #[must_use]
    pub fn rotation_delta(&self) -> f32 {
        self.rotation_delta
    }

    /// Restore camera, lights and rotation delta to their initial values.
    pub fn reset(&mut self) {
        self.camera = self.initial_camera;
        self.lights = self.initial_lights;
        self.rotation_delta = DEFAULT_ROTATION_DELTA;
        info!("Eye position, up vector, lights and rotation delta reset.");
    }

    /// Perform a single discrete change of the scene.
    pub fn apply(&mut self, action: Action) -> FrameControl {
        debug!("applying {action:?}");
        let angle = self.rotation_delta.to_radians();
        let [light0, light1] = &mut self.lights;

        match action {
            Action::Terminate => return FrameControl::Exit,
            Action::Reset => self.reset(),
            Action::IncreaseRotationDelta => self.adjust_rotation_delta(ROTATION_DELTA_STEP),
            Action::DecreaseRotationDelta => self.adjust_rotation_delta(-ROTATION_DELTA_STEP),
            Action::OrbitLeft => self.camera.rotate_left(angle),
            Action::OrbitRight => self.camera.rotate_right(angle),
            Action::OrbitUp => self.camera.rotate_up(angle),
            Action::OrbitDown => self.camera.rotate_down(angle),
            Action::Light0RotateUp => light0.rotate_around_horizontal_axis(angle),
            Action::Light0RotateLeft => light0.rotate_around_vertical_axis(angle),
            Action::Light0Roll => light0.roll(angle),
            Action::Light1RotateUp => light1.rotate_around_horizontal_axis(angle),
            Action::Light1RotateLeft => light1.rotate_around_vertical_axis(angle),
            Action::Light1Roll => light1.roll(angle),
            Action::DollyForward => self.camera.forward(),
            Action::DollyBackward => self.camera.backward(),
            Action::PanLeft => self.camera.pan_left(),
            Action::PanRight => self.camera.pan_right(),
            Action::ToggleLight0 => light0.toggle(),
            Action::ToggleLight1 => light1.toggle(),
        }

        FrameControl::Continue
    }

    fn adjust_rotation_delta(&mut self, step: f32) {
        self.rotation_delta =
            (self.rotation_delta + step).clamp(MIN_ROTATION_DELTA, MAX_ROTATION_DELTA);
        debug!("rotation delta is now {}°", self.rotation_delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const MUTATIONS: [Action; 18] = [
        Action::IncreaseRotationDelta,
        Action::DecreaseRotationDelta,
        Action::OrbitLeft,
        Action::OrbitRight,
        Action::OrbitUp,
        Action::OrbitDown,
        Action::Light0RotateUp,
        Action::Light0RotateLeft,
        Action::Light0Roll,
        Action::Light1RotateUp,
        Action::Light1RotateLeft,
        Action::Light1Roll,
        Action::DollyForward,
        Action::DollyBackward,
        Action::PanLeft,
        Action::PanRight,
        Action::ToggleLight0,
        Action::ToggleLight1,
    ];

    fn scene() -> SceneState {
        SceneState::initial().expect("built-in scene is valid")
    }

    #[test]
    fn initial_scene_matches_startup_values() {
        let scene = scene();
        assert_eq!(scene.camera().eye(), Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(scene.camera().target(), Vec3::ZERO);
        assert_eq!(scene.lights()[0].position(), Vec3::new(0.0, 50.0, 50.0));
        assert_eq!(scene.lights()[1].position(), Vec3::new(0.0, 50.0, -50.0));
        assert_abs_diff_eq!(scene.rotation_delta(), DEFAULT_ROTATION_DELTA);
    }

    #[test]
    fn reset_restores_initial_values_after_any_mutation() {
        let initial = scene();
        let mut scene = initial.clone();

        for (index, action) in MUTATIONS.iter().cycle().take(200).enumerate() {
            assert_eq!(scene.apply(*action), FrameControl::Continue);
            if index % 7 == 0 {
                scene.apply(Action::IncreaseRotationDelta);
            }
        }
        assert_ne!(scene, initial, "the mutations should have changed something");

        assert_eq!(scene.apply(Action::Reset), FrameControl::Continue);
        assert_eq!(scene, initial);

        scene.reset();
        assert_eq!(scene, initial, "reset is idempotent");
    }

    #[test]
    fn terminate_requests_exit_without_touching_the_scene() {
        let initial = scene();
        let mut scene = initial.clone();
        assert_eq!(scene.apply(Action::Terminate), FrameControl::Exit);
        assert_eq!(scene, initial);
    }

    #[test]
    fn rotation_delta_stays_within_bounds() {
        let mut scene = scene();
        for _ in 0..500 {
            scene.apply(Action::IncreaseRotationDelta);
        }
        assert_abs_diff_eq!(scene.rotation_delta(), MAX_ROTATION_DELTA);

        for _ in 0..500 {
            scene.apply(Action::DecreaseRotationDelta);
        }
        assert_abs_diff_eq!(scene.rotation_delta(), MIN_ROTATION_DELTA);
    }

    #[test]
    fn orbiting_uses_the_rotation_delta() {
        let mut scene = scene();
        for _ in 0..90 {
            scene.apply(Action::OrbitRight);
        }
        // a quarter turn around the up axis
        let eye = scene.camera().eye();
        assert_abs_diff_eq!(eye.y, 0.0, epsilon = 1.0e-3);
        assert_abs_diff_eq!(eye.z, 0.0, epsilon = 1.0e-2);
        assert_abs_diff_eq!(eye.x.abs(), 20.0, epsilon = 1.0e-2);
    }

    #[test]
    fn light_actions_only_move_their_light() {
        let initial = scene();
        let mut scene = initial.clone();

        scene.apply(Action::Light1RotateLeft);
        assert_eq!(scene.lights()[0], initial.lights()[0]);
        assert_ne!(scene.lights()[1], initial.lights()[1]);

        scene.apply(Action::ToggleLight0);
        assert!(!scene.lights()[0].is_enabled(), "light0 should be off");
        assert!(scene.lights()[1].is_enabled(), "light1 should be on");
    }

    #[test]
    fn dollying_forward_stops_at_the_minimum_distance() {
        let mut scene = scene();
        for _ in 0..1000 {
            scene.apply(Action::DollyForward);
        }
        assert!(
            scene.camera().distance() >= lib_geometry::MIN_EYE_DISTANCE - 1.0e-4,
            "eye came too close: {}",
            scene.camera().distance()
        );
    }
}
