mod color;
mod edges;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use edges::{Edges, Sides};
pub use enums::{
    Align, Border, Direction, Justify, Length, PointerEvents, Position, Size, TextStyle,
};
pub use style::{Declarations, Style};
