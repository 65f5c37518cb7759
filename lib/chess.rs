mod board;
mod color;
mod figure;
mod file;
mod notation;
mod piece;
mod promotion;
mod rank;
mod role;
mod square;

pub use board::*;
pub use color::*;
pub use figure::*;
pub use file::*;
pub use notation::*;
pub use piece::*;
pub use promotion::*;
pub use rank::*;
pub use role::*;
pub use square::*;
