//! Owner entity

use core_kernel::OwnerId;
use serde::{Deserialize, Serialize};

/// A registered car owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Unique identifier
    pub id: OwnerId,
    /// Display name
    pub name: String,
    /// Contact email, if known
    pub email: Option<String>,
}
