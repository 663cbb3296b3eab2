#![allow(missing_docs, reason = "TODO remove before release")]

mod actions;
mod error;
mod frame;
mod renderer;
mod scene;
mod state;
mod uniforms;

pub use actions::{Action, KeyBinding, KeyBindings};
pub use error::{EngineError, EngineResult};
pub use frame::compose_frame;
pub use lib_teapot_mesh::{DEFAULT_DETAIL as DEFAULT_MESH_DETAIL, MAX_DETAIL as MAX_MESH_DETAIL};
pub use renderer::{Renderer, RendererBuilder, FRAGMENT_SHADER, VERTEX_SHADER};
pub use scene::{Material, Teapot};
pub use state::{
    SceneState, DEFAULT_ROTATION_DELTA, MAX_ROTATION_DELTA, MIN_ROTATION_DELTA,
    ROTATION_DELTA_STEP,
};
pub use uniforms::{missing_uniforms, FrameUniforms, UNIFORM_BLOCK_SIZE, UNIFORM_LAYOUT};

/// Default location of the shader sources, relative to the workspace root.
pub const DEFAULT_SHADER_DIR: &str = "engines/teapot/shaders";
