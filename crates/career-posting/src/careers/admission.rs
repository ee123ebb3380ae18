use serde::{Deserialize, Serialize};

use super::repository::DirectoryEntry;

/// Base limit applied when an organization has no resolvable plan, or the plan
/// carries no limit.
pub const DEFAULT_JOB_LIMIT: u64 = 3;

/// Effective posting capacity for one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingCapacity {
    pub base_limit: u64,
    pub extra_slots: u64,
}

impl PostingCapacity {
    pub fn for_entry(entry: &DirectoryEntry) -> Self {
        let base_limit = entry
            .plan
            .as_ref()
            .and_then(|plan| plan.job_limit)
            .unwrap_or(DEFAULT_JOB_LIMIT);

        let extra_slots = entry
            .organization
            .extra_job_slots
            .and_then(|slots| u64::try_from(slots).ok())
            .unwrap_or(0);

        Self {
            base_limit,
            extra_slots,
        }
    }

    pub fn total(&self) -> u64 {
        self.base_limit.saturating_add(self.extra_slots)
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AdmissionDecision {
    Admitted { capacity: u64, active: u64 },
    Denied(DenialReason),
}

impl AdmissionDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionDecision::Admitted { .. })
    }

    pub fn capacity(&self) -> u64 {
        match self {
            AdmissionDecision::Admitted { capacity, .. } => *capacity,
            AdmissionDecision::Denied(DenialReason::CapacityReached { capacity, .. }) => *capacity,
        }
    }

    /// Slots still open after the postings already active.
    pub fn remaining(&self) -> u64 {
        match self {
            AdmissionDecision::Admitted { capacity, active } => capacity.saturating_sub(*active),
            AdmissionDecision::Denied(_) => 0,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AdmissionDecision::Admitted { capacity, active } => {
                format!("admitted ({active} of {capacity} active postings in use)")
            }
            AdmissionDecision::Denied(reason) => reason.summary(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    CapacityReached { capacity: u64, active: u64 },
}

impl DenialReason {
    pub fn summary(&self) -> String {
        match self {
            DenialReason::CapacityReached { capacity, active } => format!(
                "job posting limit reached ({active} active of {capacity} allowed by the current plan)"
            ),
        }
    }
}

/// Decide whether one more active posting fits the organization's capacity.
pub fn evaluate(entry: &DirectoryEntry, active: u64) -> AdmissionDecision {
    let capacity = PostingCapacity::for_entry(entry).total();

    if active >= capacity {
        return AdmissionDecision::Denied(DenialReason::CapacityReached { capacity, active });
    }

    AdmissionDecision::Admitted { capacity, active }
}
