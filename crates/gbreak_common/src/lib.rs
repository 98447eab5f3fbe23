//! Common utilities shared by the gbreak crates

mod bytes;

pub mod collections;
pub mod sync;
pub mod time;

pub use bytes::*;
pub mod prelude;
