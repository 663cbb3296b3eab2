#![allow(missing_docs, reason = "TODO add later")]

mod mesh;
mod model;

pub use mesh::Mesh;
pub use model::{MeshData, Vertex, DEFAULT_DETAIL, MAX_DETAIL, MIN_DETAIL};
