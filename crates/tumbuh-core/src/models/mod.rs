pub mod patient;
pub mod tier;
