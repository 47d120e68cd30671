//! Request/Response data transfer objects

pub mod admin;
pub mod cars;
pub mod claims;
pub mod policies;
