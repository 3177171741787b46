//! landcal - Land parcel area from survey coordinates, in m² and Thai Rai/Ngan/Square Wah

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod geometry;
pub mod plot;
pub mod repl;
pub mod units;

pub use domain::Point;
pub use error::LandError;
pub use geometry::polygon_area;
pub use units::{ThaiArea, convert_to_thai_units};
