use glam::{Mat4, Vec3, Vec4};

/// Surface properties used by the Blinn-Phong shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    shininess: f32,
}

impl Material {
    #[must_use]
    pub fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    #[must_use]
    pub fn ambient(&self) -> Vec4 {
        self.ambient
    }

    #[must_use]
    pub fn diffuse(&self) -> Vec4 {
        self.diffuse
    }

    #[must_use]
    pub fn specular(&self) -> Vec4 {
        self.specular
    }

    #[must_use]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }
}

impl Default for Material {
    /// Dull grey ambient, cyan diffuse and white highlights.
    fn default() -> Self {
        Self::new(
            Vec4::new(0.2, 0.2, 0.2, 1.0),
            Vec4::new(0.0, 1.0, 1.0, 1.0),
            Vec4::ONE,
            100.0,
        )
    }
}

/// Placement and material of the teapot. The mesh itself lives on the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Teapot {
    position: Vec3,
    scale: f32,
    material: Material,
}

impl Teapot {
    #[must_use]
    pub fn new(position: Vec3, scale: f32, material: Material) -> Self {
        Self {
            position,
            scale,
            material,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Object to world transform.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

impl Default for Teapot {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0, Material::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn model_matrix_scales_before_translating() {
        let teapot = Teapot::new(Vec3::new(1.0, 2.0, 3.0), 2.0, Material::default());
        let transformed = teapot.model_matrix().transform_point3(Vec3::X);
        assert!(
            transformed.abs_diff_eq(Vec3::new(3.0, 2.0, 3.0), 1.0e-6),
            "unexpected {transformed}"
        );
    }

    #[test]
    fn default_teapot_sits_at_the_origin() {
        let teapot = Teapot::default();
        assert_eq!(teapot.model_matrix(), Mat4::IDENTITY);
        assert_eq!(teapot.material().diffuse(), Vec4::new(0.0, 1.0, 1.0, 1.0));
        assert_relative_eq!(teapot.material().shininess(), 100.0);
    }
}
