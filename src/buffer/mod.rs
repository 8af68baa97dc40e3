//! Buffer types.
//!
//! - [`Buffer`] - Fixed-capacity scratch buffer with filled/read cursors

mod data;

pub use data::Buffer;
