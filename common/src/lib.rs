//! Geometry shared by the map tools: planes as half-spaces and the brush face solver.

pub mod brush;
pub mod plane;
pub mod prelude;
