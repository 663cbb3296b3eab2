use crate::InputState;
use std::error::Error;

/// What the event loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

pub trait RendererBuilder {
    type Renderer: Renderer;
    type Error: Error + 'static;

    /// Create all GPU resources once the surface is known.
    ///
    /// # Errors
    ///
    /// Any failure is fatal and stops the application.
    fn build(
        self,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &wgpu::SurfaceConfiguration,
    ) -> Result<Self::Renderer, Self::Error>;
}

pub trait Renderer {
    type Error: Error;

    /// Apply the current input to the renderer's state.
    ///
    /// Key presses which triggered a one-shot reaction should be consumed.
    fn update(&mut self, input: &mut InputState) -> FrameControl;

    fn resize(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &wgpu::SurfaceConfiguration,
    );

    /// Draw one frame into `texture_view`.
    ///
    /// # Errors
    ///
    /// Frame-level failures are reported to the caller which decides whether to keep going.
    fn render(
        &mut self,
        texture_view: &wgpu::TextureView,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<(), Self::Error>;
}
