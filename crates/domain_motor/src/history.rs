//! Per-car history merging
//!
//! Combines policy coverage boundaries and claims into one chronological
//! event sequence for the history endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::policy::InsurancePolicy;

/// A single entry in a car's chronological history
///
/// Closed tagged union; the serialized discriminator is the fixed
/// `eventType` label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum CarHistoryEvent {
    /// Coverage began
    PolicyStart { date: NaiveDate, provider: String },
    /// Coverage ended
    PolicyEnd { date: NaiveDate, provider: String },
    /// A claim was filed
    Claim {
        date: NaiveDate,
        description: String,
        amount: Decimal,
    },
}

impl CarHistoryEvent {
    /// The calendar date the event is sorted by
    pub fn date(&self) -> NaiveDate {
        match self {
            CarHistoryEvent::PolicyStart { date, .. } => *date,
            CarHistoryEvent::PolicyEnd { date, .. } => *date,
            CarHistoryEvent::Claim { date, .. } => *date,
        }
    }
}

/// Merges a car's policies and claims into one ascending-by-date sequence.
///
/// Each policy contributes a start and an end event (provider falls back to
/// "Unknown"); each claim contributes one event. The sort key is the date
/// only and the sort is stable, so equal-date events keep input order:
/// policies before claims, each list in its original order.
pub fn merge_history(policies: &[InsurancePolicy], claims: &[Claim]) -> Vec<CarHistoryEvent> {
    let mut events = Vec::with_capacity(policies.len() * 2 + claims.len());

    for policy in policies {
        let provider = policy.provider_display().to_string();
        events.push(CarHistoryEvent::PolicyStart {
            date: policy.start_date,
            provider: provider.clone(),
        });
        events.push(CarHistoryEvent::PolicyEnd {
            date: policy.end_date,
            provider,
        });
    }

    for claim in claims {
        events.push(CarHistoryEvent::Claim {
            date: claim.claim_date,
            description: claim.description.clone(),
            amount: claim.amount,
        });
    }

    events.sort_by_key(CarHistoryEvent::date);
    events
}
