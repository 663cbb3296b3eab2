#![allow(missing_docs, reason = "TODO add later")]

mod camera;
mod light;
mod viewport;

pub use camera::{
    Camera, CameraError, DOLLY_STEP, MAX_DISTANCE_FACTOR, MIN_EYE_DISTANCE, PAN_STEP,
};
use glam::{Mat4, Vec4};
pub use light::SpinningLight;
pub use viewport::Viewport;

pub const SIZE_OF_VEC4: u64 = size_of::<Vec4>() as u64;
pub const SIZE_OF_MAT4: u64 = size_of::<Mat4>() as u64;
