pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod indicator;
pub mod model;
