//! Scene tessellation
//!
//! Turns a `Scene` into a flat triangle list any GPU backend can upload.

pub mod shapes;
pub mod vertex;

pub use shapes::{Viewport, scene as tessellate};
pub use vertex::Vertex;
