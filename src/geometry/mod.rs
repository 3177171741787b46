pub mod area;
pub mod scaling;

pub use area::{Winding, polygon_area, signed_area};
pub use scaling::{Bounds, Scaler};
