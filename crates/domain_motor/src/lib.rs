//! Motor insurance domain
//!
//! This crate holds the single bounded context of the system: registering
//! cars and their owners, attaching insurance policies and claims, answering
//! coverage-validity queries, merging per-car history, and monitoring
//! policies for expiration.
//!
//! Persistence is reached through the [`ports::MotorStore`] trait; the
//! PostgreSQL adapter lives in `infra_db` and an in-memory adapter for tests
//! lives in `test_utils`.

pub mod car;
pub mod claim;
pub mod expiration;
pub mod history;
pub mod owner;
pub mod policy;
pub mod poller;
pub mod ports;
pub mod services;
pub mod validation;

pub use car::{Car, NewCar};
pub use claim::{Claim, NewClaim};
pub use expiration::{
    ExpirationCheck, ExpirationOptions, ExpirationSummary, NewProcessedExpiration,
    PolicyExpirationService, ProcessedExpiration,
};
pub use history::{merge_history, CarHistoryEvent};
pub use owner::Owner;
pub use policy::{find_conflict, InsurancePolicy, NewPolicy, UNKNOWN_PROVIDER};
pub use poller::{ExpirationPoller, PollerOptions};
pub use ports::{CarWithOwner, ExpiredPolicy, MotorStore};
pub use services::{CarRegistration, CarService, ClaimSubmission, PolicyApplication};
