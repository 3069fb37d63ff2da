pub mod catalog;
pub mod config;
pub mod error;
pub mod estimator;
pub mod packer;
pub mod render;
pub mod segment;
pub mod solver;
pub mod types;

pub use error::{Error, Result};
