//! tumbuh-core
//!
//! Shared vocabulary of the Tumbuh system. Pure data and pure functions:
//! patient descriptors, the ordered-boundary classifier every engine is
//! built on, and severity tier tables.

pub mod classify;
pub mod error;
pub mod models;
pub mod round;
