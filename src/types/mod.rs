pub mod dataset;
pub mod date_range;
