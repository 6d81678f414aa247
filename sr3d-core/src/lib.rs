/// sr3d Core Library - the software rendering pipeline
///
/// Mesh storage and generators, OBJ loading, transformation and projection
/// math, and a rasterizer writing into a CPU pixel buffer. Presentation is
/// left to implementors of [`display::Display`].

pub mod display;
pub mod error;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use display::{Display, DisplayEvents, MemoryDisplay};
pub use error::{Error, Result};
pub use geometry::{Face, Mesh, Triangle, VertexIndex, NO_INDEX};
pub use math::{Vec2, Vec3};
pub use projection::Camera;
pub use raster::ColorBuffer;
pub use scene::{RenderMode, RenderSettings, Scene};
pub use transform::{RotationState, Transform};
