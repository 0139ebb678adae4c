//! tumbuh-calc
//!
//! Weight-based clinical formulas. Every function is pure and rejects
//! non-positive weights and heights instead of returning an empty result.

pub mod bmi;
pub mod dosing;
pub mod error;
pub mod fluids;
pub mod iron;
