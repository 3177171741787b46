pub mod report;

pub use report::{CONNECTION_FAILED_MESSAGE, build_prompt, generate_land_report};
