use crate::{graphics_context::GraphicsContext, FrameworkError, FrameworkResult};
use log::{info, warn};
use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

/// Wrapper type which manages the surface and surface configuration.
///
/// As surface usage varies per platform, wrapping this up cleans up the event loop code.
pub(crate) struct SurfaceWrapper {
    surface: Option<wgpu::Surface<'static>>,
    config: Option<wgpu::SurfaceConfiguration>,
}

impl SurfaceWrapper {
    /// Create a new surface wrapper with no surface or configuration.
    pub(crate) fn new() -> Self {
        Self {
            surface: None,
            config: None,
        }
    }

    /// Create the surface for `window` and configure it to the window's current size.
    pub(crate) fn resume(
        &mut self,
        context: &GraphicsContext,
        window: Arc<Window>,
        srgb: bool,
    ) -> FrameworkResult<()> {
        // Window size is only actually valid after we enter the event loop.
        let window_size = window.inner_size();
        let width = window_size.width.max(1);
        let height = window_size.height.max(1);

        info!("Surface resume {window_size:?}");

        let surface = context.instance.create_surface(window)?;

        let mut config = surface
            .get_default_config(&context.adapter, width, height)
            .ok_or(FrameworkError::UnsupportedSurface)?;
        if srgb {
            // Not all platforms (WebGPU) support sRGB swapchains, so we need to use view formats
            let view_format = config.format.add_srgb_suffix();
            config.view_formats.push(view_format);
        } else {
            // All platforms support non-sRGB swapchains, so we can just use the format directly.
            let format = config.format.remove_srgb_suffix();
            config.format = format;
            config.view_formats.push(format);
        };
        config.present_mode = wgpu::PresentMode::AutoVsync;

        surface.configure(&context.device, &config);
        self.surface = Some(surface);
        self.config = Some(config);
        Ok(())
    }

    /// Resize the surface, making sure to not resize to zero.
    pub(crate) fn resize(&mut self, context: &GraphicsContext, size: PhysicalSize<u32>) {
        info!("Surface resize {size:?}");

        let (Some(surface), Some(config)) = (self.surface.as_ref(), self.config.as_mut()) else {
            return;
        };
        config.width = size.width.max(1);
        config.height = size.height.max(1);
        surface.configure(&context.device, config);
    }

    /// Acquire the next surface texture.
    ///
    /// Returns `None` if no texture could be acquired for this frame.
    pub(crate) fn acquire(&mut self, context: &GraphicsContext) -> Option<wgpu::SurfaceTexture> {
        let (Some(surface), Some(config)) = (self.surface.as_ref(), self.config.as_ref()) else {
            return None;
        };

        let retry = match surface.get_current_texture() {
            Ok(frame) => return Some(frame),
            // If we timed out, just try again
            Err(wgpu::SurfaceError::Timeout) => surface.get_current_texture(),
            Err(
                // If the surface is outdated, or was lost, reconfigure it.
                wgpu::SurfaceError::Outdated
                | wgpu::SurfaceError::Lost
                // If OutOfMemory happens, reconfiguring may not help, but we might as well try
                | wgpu::SurfaceError::OutOfMemory,
            ) => {
                surface.configure(&context.device, config);
                surface.get_current_texture()
            }
        };

        retry
            .inspect_err(|error| warn!("Failed to acquire next surface texture: {error}"))
            .ok()
    }

    /// On suspend on android, we drop the surface, as it's no longer valid.
    ///
    /// A suspend event is always followed by at least one resume event.
    pub(crate) fn suspend(&mut self) {
        if cfg!(target_os = "android") {
            self.surface = None;
        }
    }

    pub(crate) fn config(&self) -> Option<&wgpu::SurfaceConfiguration> {
        self.config.as_ref()
    }
}
