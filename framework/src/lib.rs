#![allow(missing_docs, reason = "TODO remove before release")]

pub mod application;
mod error;
mod graphics_context;
mod input;
pub mod logging;
pub mod renderer;
mod surface_wrapper;

pub use application::{run, WindowConfig};
pub use error::{FrameworkError, FrameworkResult};
pub use input::InputState;
pub use renderer::FrameControl;
