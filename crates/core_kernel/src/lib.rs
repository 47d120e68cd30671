//! Core Kernel - Foundational types and utilities for the motor insurance system
//!
//! This crate provides the fundamental building blocks used across all other crates:
//! - Strongly-typed entity identifiers
//! - Temporal types for calendar-date ranges and timezone handling
//! - The shared domain error taxonomy and the storage-port error type

pub mod error;
pub mod identifiers;
pub mod ports;
pub mod temporal;

pub use error::DomainError;
pub use identifiers::{CarId, ClaimId, ExpirationId, OwnerId, PolicyId};
pub use ports::StoreError;
pub use temporal::{DateRange, TemporalError, Timezone};
