use crate::{
    graphics_context::GraphicsContext,
    renderer::{FrameControl, Renderer, RendererBuilder},
    surface_wrapper::SurfaceWrapper,
    FrameworkError, FrameworkResult, InputState,
};
use log::{debug, error, info, trace};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

/// Properties of the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub struct Application<Builder: RendererBuilder> {
    /// consumed when the first surface becomes available
    renderer_builder: Option<Builder>,
    renderer: Option<Builder::Renderer>,
    surface: SurfaceWrapper,
    context: GraphicsContext,
    window: Option<Arc<Window>>,
    window_config: WindowConfig,
    input: InputState,
    frame_counter: u32,
    frame_time: Instant,
    /// the reason why the event loop was stopped early
    error: Option<FrameworkError>,
}

impl<Builder: RendererBuilder> Application<Builder> {
    /// Create the graphics context; window and renderer follow once the event loop resumes.
    ///
    /// # Errors
    ///
    /// Fails if no adapter or device can be found.
    pub async fn new(window_config: WindowConfig, renderer_builder: Builder) -> FrameworkResult<Self> {
        let context = GraphicsContext::init_async().await?;

        Ok(Self {
            renderer_builder: Some(renderer_builder),
            renderer: None,
            surface: SurfaceWrapper::new(),
            context,
            window: None,
            window_config,
            input: InputState::new(),
            frame_counter: 0,
            frame_time: Instant::now(),
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> FrameworkResult<()> {
        let window = match self.window.as_ref() {
            Some(window) => Arc::clone(window),
            None => {
                let attributes = WindowAttributes::default()
                    .with_title(&self.window_config.title)
                    .with_inner_size(LogicalSize::new(
                        self.window_config.width,
                        self.window_config.height,
                    ));
                Arc::new(event_loop.create_window(attributes)?)
            }
        };

        self.surface
            .resume(&self.context, Arc::clone(&window), true)?;
        self.window = Some(window);

        // First-time init of the scene
        if let (Some(renderer_builder), Some(config)) =
            (self.renderer_builder.take(), self.surface.config())
        {
            let renderer = renderer_builder
                .build(
                    &self.context.adapter,
                    &self.context.device,
                    &self.context.queue,
                    config,
                )
                .map_err(|error| FrameworkError::Renderer(Box::new(error)))?;
            self.renderer = Some(renderer);
        }

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: FrameworkError) {
        error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    /// Render, present and then let the renderer react to the input.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // On MacOS, currently redraw requested comes in _before_ Init does.
        // If this happens, just drop the requested redraw on the floor.
        //
        // See https://github.com/rust-windowing/winit/issues/3235 for some discussion
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        let Some(frame) = self.surface.acquire(&self.context) else {
            self.request_redraw();
            return;
        };
        let view_format = self
            .surface
            .config()
            .and_then(|config| config.view_formats.first().copied());
        let texture_view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: view_format,
            ..wgpu::TextureViewDescriptor::default()
        });

        if let Err(error) = renderer.render(&texture_view, &self.context.device, &self.context.queue)
        {
            error!("failed to render frame: {error}");
        }

        if let Some(window) = self.window.as_ref() {
            window.pre_present_notify();
        }
        frame.present();

        let control = renderer.update(&mut self.input);
        self.input.end_frame();
        self.update_fps();

        match control {
            FrameControl::Continue => self.request_redraw(),
            FrameControl::Exit => {
                info!("Renderer requested exit. Shutting down event loop.");
                event_loop.exit();
            }
        }
    }

    fn keyboard_input(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let KeyEvent {
            physical_key,
            ref logical_key,
            state,
            repeat,
            ..
        } = *event;

        if let PhysicalKey::Code(code) = physical_key {
            self.input.set_key(code, state);
        } else {
            trace!("ignoring unidentified key {physical_key:?}");
        }

        if *logical_key == Key::Named(NamedKey::Escape) && state == ElementState::Pressed && !repeat
        {
            info!("Escape pressed. Shutting down event loop.");
            event_loop.exit();
        }
    }

    fn update_fps(&mut self) {
        self.frame_counter += 1;
        let span = self.frame_time.elapsed();
        if span >= Duration::from_secs(1) {
            #[expect(
                clippy::cast_precision_loss,
                reason = "frame counts per second are small"
            )]
            let fps = (self.frame_counter as f32 / span.as_secs_f32()).round();
            debug!("{fps} fps");
            self.frame_counter = 0;
            self.frame_time += span;
        }
    }
}

impl<Builder: RendererBuilder> ApplicationHandler for Application<Builder> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        trace!("window event loop was resumed");
        if let Err(error) = self.init(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => {
                trace!("WindowEvent::Resized({size:?})");

                self.surface.resize(&self.context, size);
                if let (Some(renderer), Some(config)) =
                    (self.renderer.as_mut(), self.surface.config())
                {
                    renderer.resize(&self.context.device, &self.context.queue, config);
                }

                self.request_redraw();
            }
            WindowEvent::CloseRequested => {
                info!("Window close requested. Shutting down event loop.");
                event_loop.exit();
            }
            WindowEvent::Focused(focused) => {
                trace!("WindowEvent::Focused({focused})");
                if !focused {
                    self.input.release_all();
                }
            }
            WindowEvent::KeyboardInput {
                device_id,
                ref event,
                is_synthetic,
            } => {
                trace!("WindowEvent::KeyboardInput({device_id:?}, {event:?}, {is_synthetic})");
                self.keyboard_input(event_loop, event);
            }
            WindowEvent::MouseInput {
                device_id,
                state,
                button,
            } => {
                trace!("WindowEvent::MouseInput({device_id:?}, {state:?}, {button:?})");
                self.input.set_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                // these are super-noisy, so no tracing here
                self.input.move_cursor(position);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                trace!("WindowEvent::{other:?}");
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        trace!("window event loop is exiting");
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        trace!("window event loop was suspended");
        self.surface.suspend();
    }
}

/// Open the main window and drive `renderer_builder`'s renderer until the window is closed.
///
/// # Errors
///
/// Returns the first fatal error of the window, graphics context or renderer setup.
pub fn run<Builder: RendererBuilder>(
    window_config: WindowConfig,
    renderer_builder: Builder,
) -> FrameworkResult<()> {
    let event_loop = EventLoop::new()?;

    // ControlFlow::Poll continuously runs the event loop, even if the OS hasn't
    // dispatched any events. This is ideal for games and similar applications.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut application = pollster::block_on(Application::new(window_config, renderer_builder))?;

    info!("Entering event loop...");
    event_loop.run_app(&mut application)?;

    application.error.take().map_or(Ok(()), Err)
}
