//! Scene-level helpers поверх reconcile: camera, dispose, graph index

pub mod camera;
pub mod dispose;
pub mod graph;


pub use camera::{calculate_dpr, is_orthographic_camera, is_perspective_camera, update_camera, Dpr};
pub use dispose::dispose;
pub use graph::{build_graph, Graph};
