pub mod error;
pub mod load_region;
