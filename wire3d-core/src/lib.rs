/// wire3d Core Library - wireframe geometry and transformation engine
///
/// This library parses wireframe scripts, composes transformation matrices,
/// tessellates circles and cubic curves into an edge matrix, and hands the
/// edge matrix to a rasterizer through the `Output` trait.

pub mod curve;
pub mod edges;
pub mod error;
pub mod matrix;
pub mod scene;
pub mod script;
pub mod transform;

// Re-export commonly used types
pub use edges::{EdgeMatrix, Point, Segment};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use scene::{Output, Scene};
pub use script::{parse_script, parse_script_file, Command};
pub use transform::{Axis, Transform};
