pub mod editor;
pub mod input;
pub mod parcel;
pub mod point;

pub use editor::{Draft, RowEditor};
pub use input::{parse_coordinate, parse_pair};
pub use parcel::{Coordinate, MIN_POLYGON_POINTS, Parcel};
pub use point::Point;
