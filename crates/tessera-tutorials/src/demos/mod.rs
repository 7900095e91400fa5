//! Tutorial scenes.
//!
//! Each demo is a [`Scene`](tessera_engine::scene::Scene): it builds its
//! pipelines once from the scene context and only records draws afterwards.

mod camera;
mod pentagon;
mod pipeline;
mod polygon;
mod textured;
mod textures;
mod triangle_msaa;

pub use camera::CameraDemo;
pub use polygon::PolygonDemo;
pub use textured::TexturedDemo;
pub use triangle_msaa::TriangleMsaa;
