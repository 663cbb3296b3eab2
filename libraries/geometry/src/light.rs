use glam::{Quat, Vec3, Vec4};

/// A point light orbiting around a fixed center.
///
/// All rotations keep the distance between `position` and `center` constant.
/// The `tangent` is the horizontal axis used by [`Self::rotate_around_horizontal_axis`];
/// rolling the light tilts this axis around the radial direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinningLight {
    color: Vec3,
    position: Vec3,
    center: Vec3,
    /// distance to `center` at creation, restored after every rotation
    orbit_radius: f32,
    tangent: Vec3,
    enabled: bool,
}

impl SpinningLight {
    #[must_use]
    pub fn new(color: Vec3, position: Vec3, center: Vec3) -> Self {
        let radial = (position - center).normalize_or_zero();
        let tangent = Vec3::Y.cross(radial).try_normalize().unwrap_or_else(|| {
            if radial == Vec3::ZERO {
                Vec3::X
            } else {
                radial.any_orthonormal_vector()
            }
        });

        Self {
            color,
            position,
            center,
            orbit_radius: position.distance(center),
            tangent,
            enabled: true,
        }
    }

    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Distance between the light and its center of rotation.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.position.distance(self.center)
    }

    /// The color to feed into the shading stage.
    ///
    /// A disabled light reports black and contributes nothing.
    #[must_use]
    pub fn color_vec4(&self) -> Vec4 {
        if self.enabled {
            self.color.extend(1.0)
        } else {
            Vec4::W
        }
    }

    /// The position as a homogeneous point.
    #[must_use]
    pub fn position_vec4(&self) -> Vec4 {
        self.position.extend(1.0)
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Spin the light around the world's vertical axis (y) through its center.
    pub fn rotate_around_vertical_axis(&mut self, angle: f32) {
        let rotation = Quat::from_rotation_y(angle);
        self.rotate(rotation);
        self.tangent = (rotation * self.tangent).normalize();
    }

    /// Spin the light around its horizontal axis through its center.
    pub fn rotate_around_horizontal_axis(&mut self, angle: f32) {
        self.rotate(Quat::from_axis_angle(self.tangent, angle));
    }

    /// Tilt the horizontal axis around the direction from the center to the light.
    ///
    /// The position stays where it is, but subsequent horizontal rotations
    /// follow a different great circle.
    pub fn roll(&mut self, angle: f32) {
        let Some(radial) = (self.position - self.center).try_normalize() else {
            return;
        };
        let rotation = Quat::from_axis_angle(radial, angle);
        self.tangent = (rotation * self.tangent).normalize();
    }

    fn rotate(&mut self, rotation: Quat) {
        let offset = rotation * (self.position - self.center);
        self.position = self.center + offset.normalize_or_zero() * self.orbit_radius;
    }
}
