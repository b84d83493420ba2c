pub mod course;
pub mod game;
pub mod wire;

pub use crate::geometry::Point;
pub use course::*;
pub use game::*;
