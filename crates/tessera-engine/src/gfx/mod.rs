//! GPU resource helpers shared by scenes.
//!
//! Plain descriptor population: vertex layouts, indexed meshes, textures.
//! None of it holds control logic.

mod mesh;
mod texture;
mod vertex;

pub use mesh::{Mesh, polygon};
pub use texture::{Texture, decode_rgba};
pub use vertex::{ColorVertex, TexVertex};
