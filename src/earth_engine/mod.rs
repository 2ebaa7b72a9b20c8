//! Minimal client for the Earth Engine REST API: expression building,
//! serialisation and the `value:compute` call.

pub mod algorithms;
pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod value;
