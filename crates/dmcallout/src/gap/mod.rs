//! Generic Access Profile identifiers shared by the pairing and audio paths

pub mod types;


pub use types::*;
