use glam::{Mat4, Quat, Vec3};
use std::fmt::{self, Display};

/// The eye is never moved closer than this to the target.
pub const MIN_EYE_DISTANCE: f32 = 2.0;

/// The eye is never moved farther than this fraction of the far plane away from the target.
pub const MAX_DISTANCE_FACTOR: f32 = 0.9;

/// Distance covered by a single pan step.
pub const PAN_STEP: f32 = 0.5;

/// Distance covered by a single dolly step.
pub const DOLLY_STEP: f32 = 0.5;

/// Below this squared length two unit vectors are treated as parallel.
const PARALLEL_EPSILON: f32 = 1.0e-6;

/// A perspective camera looking from `eye` at `target`.
///
/// The camera orbits around its target, pans sideways and moves along its view direction
/// in fixed discrete steps. `up` is kept orthonormal to the view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    up: Vec3,
    target: Vec3,
    /// distance kept by orbiting, only changed by dollying
    orbit_radius: f32,
    /// vertical field of view in degrees
    fov_y: f32,
    near: f32,
    far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    ClipPlanes { near: f32, far: f32 },
    FieldOfView(f32),
    EyeDistance(f32),
    UpVector(Vec3),
}

impl Display for CameraError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CameraError::ClipPlanes { near, far } => write!(
                formatter,
                "invalid clip planes: expected 0 < near < far, got near={near}, far={far}"
            ),
            CameraError::FieldOfView(fov_y) => write!(
                formatter,
                "invalid vertical field of view {fov_y}°, expected a value between 0° and 180°"
            ),
            CameraError::EyeDistance(distance) => write!(
                formatter,
                "eye is {distance} units away from the target which is outside of [{MIN_EYE_DISTANCE}, {MAX_DISTANCE_FACTOR} * far]"
            ),
            CameraError::UpVector(up) => {
                write!(formatter, "up vector {up} is zero or parallel to the view direction")
            }
        }
    }
}

impl std::error::Error for CameraError {}

impl Camera {
    /// Creates a new camera.
    ///
    /// `fov_y` is given in degrees.
    ///
    /// # Errors
    ///
    /// Fails if the clip planes or the field of view are out of range,
    /// if the eye is too close to (or too far from) the target
    /// or if `up` cannot be used to orient the camera.
    pub fn new(
        eye: Vec3,
        up: Vec3,
        target: Vec3,
        fov_y: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, CameraError> {
        if !(near > 0.0 && near < far) {
            return Err(CameraError::ClipPlanes { near, far });
        }
        if !(fov_y > 0.0 && fov_y < 180.0) {
            return Err(CameraError::FieldOfView(fov_y));
        }
        let distance = eye.distance(target);
        if !(MIN_EYE_DISTANCE..=far * MAX_DISTANCE_FACTOR).contains(&distance) {
            return Err(CameraError::EyeDistance(distance));
        }
        let view_direction = (target - eye).normalize();
        let right = view_direction.cross(up);
        if right.length_squared() < PARALLEL_EPSILON {
            return Err(CameraError::UpVector(up));
        }

        Ok(Self {
            eye,
            up: right.cross(view_direction).normalize(),
            target,
            orbit_radius: distance,
            fov_y,
            near,
            far,
        })
    }

    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Distance between eye and target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Unit vector pointing from the eye towards the target.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Unit vector pointing to the right of the view.
    ///
    /// Falls back to an arbitrary vector orthogonal to the view direction
    /// if `up` happens to be parallel to it.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        let view_direction = self.view_direction();
        let right = view_direction.cross(self.up);
        if right.length_squared() < PARALLEL_EPSILON {
            view_direction.any_orthonormal_vector()
        } else {
            right.normalize()
        }
    }

    #[must_use]
    pub fn look_at_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[must_use]
    pub fn perspective_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect_ratio, self.near, self.far)
    }

    /// Orbit the eye to the left around the target.
    pub fn rotate_left(&mut self, angle: f32) {
        self.orbit(self.up, -angle);
    }

    /// Orbit the eye to the right around the target.
    pub fn rotate_right(&mut self, angle: f32) {
        self.orbit(self.up, angle);
    }

    /// Orbit the eye upwards around the target.
    pub fn rotate_up(&mut self, angle: f32) {
        self.orbit(self.right(), -angle);
    }

    /// Orbit the eye downwards around the target.
    pub fn rotate_down(&mut self, angle: f32) {
        self.orbit(self.right(), angle);
    }

    pub fn pan_left(&mut self) {
        self.pan(-PAN_STEP);
    }

    pub fn pan_right(&mut self) {
        self.pan(PAN_STEP);
    }

    /// Move the eye towards the target, stopping at [`MIN_EYE_DISTANCE`].
    pub fn forward(&mut self) {
        self.set_distance(self.distance() - DOLLY_STEP);
    }

    /// Move the eye away from the target, stopping before the far plane.
    pub fn backward(&mut self) {
        self.set_distance(self.distance() + DOLLY_STEP);
    }

    fn orbit(&mut self, axis: Vec3, angle: f32) {
        let rotation = Quat::from_axis_angle(axis.normalize(), angle);
        let offset = rotation * (self.eye - self.target);
        // rescale, otherwise rounding errors of the rotations accumulate
        self.eye = self.target + offset.normalize() * self.orbit_radius;
        self.up = rotation * self.up;
        self.orthonormalize_up();
    }

    fn pan(&mut self, step: f32) {
        let offset = self.right() * step;
        self.eye += offset;
        self.target += offset;
    }

    fn set_distance(&mut self, distance: f32) {
        let distance = distance
            .min(self.far * MAX_DISTANCE_FACTOR)
            .max(MIN_EYE_DISTANCE);
        self.eye = self.target - self.view_direction() * distance;
        self.orbit_radius = distance;
    }

    /// Re-derive `up` from the view basis to compensate for drift.
    fn orthonormalize_up(&mut self) {
        self.up = self.right().cross(self.view_direction()).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1.0e-3;

    fn default_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec3::Y, Vec3::ZERO, 45.0, 1.0, 100.0).unwrap()
    }

    fn reference_look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let side = forward.cross(up).normalize();
        let up = side.cross(forward);
        Mat4::from_cols_array_2d(&[
            [side.x, up.x, -forward.x, 0.0],
            [side.y, up.y, -forward.y, 0.0],
            [side.z, up.z, -forward.z, 0.0],
            [-side.dot(eye), -up.dot(eye), forward.dot(eye), 1.0],
        ])
    }

    #[test]
    fn look_at_matches_reference_construction() {
        let camera = default_camera();
        let expected = reference_look_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
        assert!(
            camera.look_at_matrix().abs_diff_eq(expected, 1.0e-6),
            "{} != {expected}",
            camera.look_at_matrix()
        );
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut camera = default_camera();
        let angle = 1.0_f32.to_radians();
        let distance = camera.distance();

        for _ in 0..500 {
            camera.rotate_left(angle);
            assert_abs_diff_eq!(camera.distance(), distance, epsilon = EPSILON);
            camera.rotate_up(angle);
            assert_abs_diff_eq!(camera.distance(), distance, epsilon = EPSILON);
        }
        for _ in 0..300 {
            camera.rotate_right(angle);
            assert_abs_diff_eq!(camera.distance(), distance, epsilon = EPSILON);
            camera.rotate_down(angle);
            assert_abs_diff_eq!(camera.distance(), distance, epsilon = EPSILON);
        }
    }

    #[test]
    fn long_orbiting_sessions_do_not_drift() {
        let mut camera = default_camera();
        let angle = 1.0_f32.to_radians();

        // ten minutes of held keys at 60 frames per second
        for _ in 0..36_000 {
            camera.rotate_up(angle);
            camera.rotate_left(angle);
        }
        assert_abs_diff_eq!(camera.distance(), 20.0, epsilon = 1.0e-4);

        camera.forward();
        for _ in 0..36_000 {
            camera.rotate_down(angle);
        }
        assert_abs_diff_eq!(camera.distance(), 20.0 - DOLLY_STEP, epsilon = 1.0e-4);
    }

    #[test]
    fn orbit_moves_in_the_named_direction() {
        let angle = 5.0_f32.to_radians();

        let mut camera = default_camera();
        camera.rotate_left(angle);
        assert!(camera.eye().x < 0.0, "eye should move to the left: {}", camera.eye());

        let mut camera = default_camera();
        camera.rotate_right(angle);
        assert!(camera.eye().x > 0.0, "eye should move to the right: {}", camera.eye());

        let mut camera = default_camera();
        camera.rotate_up(angle);
        assert!(camera.eye().y > 0.0, "eye should move up: {}", camera.eye());

        let mut camera = default_camera();
        camera.rotate_down(angle);
        assert!(camera.eye().y < 0.0, "eye should move down: {}", camera.eye());
    }

    #[test]
    fn orbit_over_the_pole_keeps_a_valid_basis() {
        let mut camera = default_camera();
        let angle = 1.0_f32.to_radians();
        // 90° takes the eye exactly above the target, continue past it
        for _ in 0..180 {
            camera.rotate_up(angle);
            let up = camera.up();
            assert_abs_diff_eq!(up.length(), 1.0, epsilon = EPSILON);
            assert_abs_diff_eq!(up.dot(camera.view_direction()), 0.0, epsilon = EPSILON);
            assert!(
                camera.look_at_matrix().is_finite(),
                "look-at matrix degenerated at up={up}"
            );
        }
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut camera = default_camera();
        let offset = camera.eye() - camera.target();
        camera.pan_left();
        assert_abs_diff_eq!(camera.target().x, -PAN_STEP, epsilon = EPSILON);
        assert!((camera.eye() - camera.target()).abs_diff_eq(offset, EPSILON));
        camera.pan_right();
        camera.pan_right();
        assert_abs_diff_eq!(camera.target().x, PAN_STEP, epsilon = EPSILON);
        assert!((camera.eye() - camera.target()).abs_diff_eq(offset, EPSILON));
    }

    #[test]
    fn dolly_forward_never_crosses_the_minimum_distance() {
        let mut camera = default_camera();
        for _ in 0..1000 {
            camera.forward();
            assert!(
                camera.distance() >= MIN_EYE_DISTANCE - EPSILON,
                "eye got too close: {}",
                camera.distance()
            );
        }
        assert_abs_diff_eq!(camera.distance(), MIN_EYE_DISTANCE, epsilon = EPSILON);
        assert!(camera.eye().z > 0.0, "eye crossed the target: {}", camera.eye());
    }

    #[test]
    fn dolly_backward_stays_in_front_of_the_far_plane() {
        let mut camera = default_camera();
        for _ in 0..1000 {
            camera.backward();
        }
        assert_abs_diff_eq!(
            camera.distance(),
            camera.far() * MAX_DISTANCE_FACTOR,
            epsilon = EPSILON
        );
    }

    #[test]
    fn projection_scales_inversely_with_aspect_ratio() {
        let camera = default_camera();
        let square = camera.perspective_matrix(600.0 / 600.0);
        let wide = camera.perspective_matrix(1200.0 / 600.0);
        assert_abs_diff_eq!(square.x_axis.x, 2.0 * wide.x_axis.x, epsilon = 1.0e-6);
        assert_abs_diff_eq!(square.y_axis.y, wide.y_axis.y, epsilon = 1.0e-6);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let eye = Vec3::new(0.0, 0.0, 20.0);
        assert_eq!(
            Camera::new(eye, Vec3::Y, Vec3::ZERO, 45.0, 100.0, 1.0),
            Err(CameraError::ClipPlanes {
                near: 100.0,
                far: 1.0
            })
        );
        assert_eq!(
            Camera::new(eye, Vec3::Y, Vec3::ZERO, 180.0, 1.0, 100.0),
            Err(CameraError::FieldOfView(180.0))
        );
        assert_eq!(
            Camera::new(eye, Vec3::Z, Vec3::ZERO, 45.0, 1.0, 100.0),
            Err(CameraError::UpVector(Vec3::Z))
        );
        assert!(matches!(
            Camera::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, Vec3::ZERO, 45.0, 1.0, 100.0),
            Err(CameraError::EyeDistance(_))
        ));
    }
}
