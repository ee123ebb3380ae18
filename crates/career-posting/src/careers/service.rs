use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::admission::{evaluate, AdmissionDecision, DenialReason};
use super::domain::{OrganizationId, Posting, PostingId, PostingSubmission};
use super::repository::{
    DirectoryEntry, OrganizationDirectory, PostingRepository, RepositoryError,
};
use super::validation::{draft_from_submission, PostingDraft, ValidationError};

/// Service composing submission validation, plan lookup, and the admission check.
pub struct CareerPostingService<D, R> {
    directory: Arc<D>,
    repository: Arc<R>,
    admission_locks: Mutex<HashMap<OrganizationId, Arc<Mutex<()>>>>,
}

fn next_posting_id() -> PostingId {
    PostingId(format!("career-{}", Uuid::new_v4().simple()))
}

impl<D, R> CareerPostingService<D, R>
where
    D: OrganizationDirectory + 'static,
    R: PostingRepository + 'static,
{
    pub fn new(directory: Arc<D>, repository: Arc<R>) -> Self {
        Self {
            directory,
            repository,
            admission_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a posting stamped with the current time.
    pub fn create(&self, submission: PostingSubmission) -> Result<Posting, PostingServiceError> {
        self.create_at(submission, Utc::now())
    }

    /// Validate, admit, and persist a new posting.
    pub fn create_at(
        &self,
        submission: PostingSubmission,
        now: DateTime<Utc>,
    ) -> Result<Posting, PostingServiceError> {
        let draft = draft_from_submission(submission)?;
        let organization_id = draft.organization_id.clone();

        let entry = self.lookup(&organization_id)?;

        // Count and insert must not interleave with another admission for the
        // same organization in this process.
        let lock = self.admission_lock(&organization_id);
        let admitted = {
            let _held = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.admit(draft, &entry, now)
        };
        self.release_admission_lock(&organization_id, lock);

        admitted
    }

    fn admit(
        &self,
        draft: PostingDraft,
        entry: &DirectoryEntry,
        now: DateTime<Utc>,
    ) -> Result<Posting, PostingServiceError> {
        let organization_id = &draft.organization_id;
        let active = self.repository.count_active(organization_id)?;
        let decision = evaluate(entry, active);

        if let AdmissionDecision::Denied(DenialReason::CapacityReached { capacity, active }) =
            decision
        {
            warn!(
                organization = %organization_id.as_str(),
                capacity,
                active,
                "career posting denied: plan limit reached"
            );
            return Err(PostingServiceError::CapacityExceeded { capacity, active });
        }

        let posting = draft.into_posting(next_posting_id(), now);
        let stored = self.repository.insert(posting)?;

        info!(
            organization = %stored.organization_id.as_str(),
            posting = %stored.id.0,
            capacity = decision.capacity(),
            active = active + u64::from(stored.is_active()),
            "career posting created"
        );

        Ok(stored)
    }

    /// Report how much posting capacity an organization has left.
    pub fn capacity(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<CapacitySnapshot, PostingServiceError> {
        let entry = self.lookup(organization_id)?;
        let active = self.repository.count_active(organization_id)?;
        let decision = evaluate(&entry, active);

        Ok(CapacitySnapshot {
            organization_id: organization_id.clone(),
            plan: entry.plan.map(|plan| plan.id.0),
            capacity: decision.capacity(),
            active,
            remaining: decision.remaining(),
            can_post: decision.is_admitted(),
        })
    }

    fn lookup(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<DirectoryEntry, PostingServiceError> {
        self.directory.lookup(organization_id).map_err(|err| match err {
            RepositoryError::NotFound => PostingServiceError::NotFound(organization_id.clone()),
            other => PostingServiceError::from(other),
        })
    }

    fn admission_lock(&self, organization_id: &OrganizationId) -> Arc<Mutex<()>> {
        let mut locks = self
            .admission_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(organization_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forget the organization's lock once no other admission holds a handle to it.
    fn release_admission_lock(&self, organization_id: &OrganizationId, lock: Arc<Mutex<()>>) {
        let mut locks = self
            .admission_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(organization_id)
            .is_some_and(|shared| Arc::strong_count(shared) == 1)
        {
            locks.remove(organization_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_admission_locks(&self) -> usize {
        self.admission_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Capacity view backing the "remaining slots" hint in the posting wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacitySnapshot {
    pub organization_id: OrganizationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    pub capacity: u64,
    pub active: u64,
    pub remaining: u64,
    pub can_post: bool,
}

/// Error raised by the career posting service.
#[derive(Debug, thiserror::Error)]
pub enum PostingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("organization {} not found", .0.as_str())]
    NotFound(OrganizationId),
    #[error("job posting limit reached: {active} active of {capacity} allowed")]
    CapacityExceeded { capacity: u64, active: u64 },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<RepositoryError> for PostingServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => {
                Self::StorageUnavailable("referenced record disappeared".to_string())
            }
            RepositoryError::Unavailable(detail) => Self::StorageUnavailable(detail),
        }
    }
}
