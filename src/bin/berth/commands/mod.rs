//! Command implementations

pub mod bind;
pub mod hosts;
pub mod validate;
