//! I/O module for writing PRC files

pub mod prc;

pub use prc::{RandomUidSource, SequentialUidSource, UidSource};
