mod check;
mod game;
mod geometry;
mod legality;
mod resolver;
mod state;

pub use check::*;
pub use game::*;
pub use geometry::*;
pub use legality::*;
pub use resolver::*;
pub use state::*;
