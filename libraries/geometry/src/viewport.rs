/// Dimensions of the surface the scene is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    surface_width: u32,
    surface_height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new((surface_width, surface_height): (u32, u32)) -> Self {
        Self {
            surface_width,
            surface_height,
        }
    }

    #[must_use]
    pub fn surface_width(&self) -> u32 {
        self.surface_width
    }

    #[must_use]
    pub fn surface_height(&self) -> u32 {
        self.surface_height
    }

    /// Width divided by height.
    ///
    /// Collapsed surfaces (e.g. minimized windows) report a square aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.surface_width == 0 || self.surface_height == 0 {
            return 1.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "surface dimensions are far below 2^24"
        )]
        let ratio = self.surface_width as f32 / self.surface_height as f32;
        ratio
    }

    pub fn set_surface_dimensions(&mut self, (surface_width, surface_height): (u32, u32)) {
        self.surface_width = surface_width;
        self.surface_height = surface_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_ratio_follows_resizes() {
        let mut viewport = Viewport::new((600, 600));
        assert_relative_eq!(viewport.aspect_ratio(), 1.0);

        viewport.set_surface_dimensions((1280, 720));
        assert_relative_eq!(viewport.aspect_ratio(), 1280.0 / 720.0);
    }

    #[test]
    fn collapsed_surface_is_square() {
        assert_relative_eq!(Viewport::new((800, 0)).aspect_ratio(), 1.0);
        assert_relative_eq!(Viewport::new((0, 800)).aspect_ratio(), 1.0);
    }
}
