use std::{
    error::Error,
    fmt::{self, Display},
};
use winit::error::{EventLoopError, OsError};

pub type FrameworkResult<T> = Result<T, FrameworkError>;

#[derive(Debug)]
pub enum FrameworkError {
    EventLoop(EventLoopError),
    CreateWindow(OsError),
    CreateSurface(wgpu::CreateSurfaceError),
    NoAdapter,
    UnsupportedSurface,
    RequestDevice(wgpu::RequestDeviceError),
    /// The renderer could not be built for the freshly created surface.
    Renderer(Box<dyn Error>),
}

impl FrameworkError {
    /// Whether the error occurred while setting up the window or the graphics context.
    #[must_use]
    pub fn is_graphics_context(&self) -> bool {
        !matches!(self, Self::Renderer(_))
    }
}

impl Display for FrameworkError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(error) => write!(formatter, "event loop failed: {error}"),
            Self::CreateWindow(error) => write!(formatter, "failed to create window: {error}"),
            Self::CreateSurface(error) => write!(formatter, "failed to create surface: {error}"),
            Self::NoAdapter => write!(formatter, "no suitable GPU adapter found on the system"),
            Self::UnsupportedSurface => {
                write!(formatter, "the surface isn't supported by the adapter")
            }
            Self::RequestDevice(error) => {
                write!(formatter, "failed to request a graphics device: {error}")
            }
            Self::Renderer(error) => write!(formatter, "failed to initialize renderer: {error}"),
        }
    }
}

impl Error for FrameworkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EventLoop(error) => Some(error),
            Self::CreateWindow(error) => Some(error),
            Self::CreateSurface(error) => Some(error),
            Self::RequestDevice(error) => Some(error),
            Self::Renderer(error) => Some(error.as_ref()),
            Self::NoAdapter | Self::UnsupportedSurface => None,
        }
    }
}

impl From<EventLoopError> for FrameworkError {
    fn from(value: EventLoopError) -> Self {
        Self::EventLoop(value)
    }
}

impl From<OsError> for FrameworkError {
    fn from(value: OsError) -> Self {
        Self::CreateWindow(value)
    }
}

impl From<wgpu::CreateSurfaceError> for FrameworkError {
    fn from(value: wgpu::CreateSurfaceError) -> Self {
        Self::CreateSurface(value)
    }
}

impl From<wgpu::RequestDeviceError> for FrameworkError {
    fn from(value: wgpu::RequestDeviceError) -> Self {
        Self::RequestDevice(value)
    }
}
