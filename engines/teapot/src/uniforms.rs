use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use lib_geometry::{SIZE_OF_MAT4, SIZE_OF_VEC4};
use std::mem::offset_of;

/// The uniform block shared by the vertex and the fragment shader.
///
/// Mirrors `struct Uniforms` in both shader sources, bound at `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    /// inverse transpose of `model_view`
    pub normal: Mat4,
    /// view space
    pub light0_position: Vec4,
    pub light0_color: Vec4,
    /// view space
    pub light1_position: Vec4,
    pub light1_color: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    // ---- the block is padded to a multiple of 16 bytes
    pub(crate) padding: [f32; 3],
}

/// Size of the uniform block in bytes.
pub const UNIFORM_BLOCK_SIZE: u64 = 3 * SIZE_OF_MAT4 + 8 * SIZE_OF_VEC4;

const _: () = assert!(size_of::<FrameUniforms>() as u64 == UNIFORM_BLOCK_SIZE);

/// Names of the uniform block members as declared in the shaders, with their byte offsets.
pub const UNIFORM_LAYOUT: [(&str, usize); 11] = [
    ("modelViewMatrix", offset_of!(FrameUniforms, model_view)),
    ("projectionMatrix", offset_of!(FrameUniforms, projection)),
    ("normalMatrix", offset_of!(FrameUniforms, normal)),
    ("light0_position", offset_of!(FrameUniforms, light0_position)),
    ("light0_color", offset_of!(FrameUniforms, light0_color)),
    ("light1_position", offset_of!(FrameUniforms, light1_position)),
    ("light1_color", offset_of!(FrameUniforms, light1_color)),
    ("ambient", offset_of!(FrameUniforms, ambient)),
    ("diffuse", offset_of!(FrameUniforms, diffuse)),
    ("specular", offset_of!(FrameUniforms, specular)),
    ("shininess", offset_of!(FrameUniforms, shininess)),
];

/// Uniform names which are not declared as a struct member (`name:`) in any of `sources`.
#[must_use]
pub fn missing_uniforms(sources: &[&str]) -> Vec<&'static str> {
    UNIFORM_LAYOUT
        .iter()
        .map(|&(name, _)| name)
        .filter(|name| {
            let declaration = format!("{name}:");
            !sources.iter().any(|source| {
                source
                    .lines()
                    .any(|line| line.trim_start().starts_with(&declaration))
            })
        })
        .collect()
}
