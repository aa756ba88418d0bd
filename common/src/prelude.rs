pub use crate::brush::{fan_triangulate, get_vertices, winding_matches, Polygon};
pub use crate::plane::{Plane, PLANE_EPSILON};
