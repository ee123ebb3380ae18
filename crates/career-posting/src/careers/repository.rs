use serde::{Deserialize, Serialize};

use super::domain::{Organization, OrganizationId, Plan, Posting};

/// Organization joined with the plan its reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub organization: Organization,
    pub plan: Option<Plan>,
}

/// Resolves organizations together with their subscription plan.
pub trait OrganizationDirectory: Send + Sync {
    fn lookup(&self, id: &OrganizationId) -> Result<DirectoryEntry, RepositoryError>;
}

/// Storage abstraction for career postings.
pub trait PostingRepository: Send + Sync {
    fn count_active(&self, organization: &OrganizationId) -> Result<u64, RepositoryError>;
    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Find the plan an organization references. Matching happens on the
/// normalized identifier, so a numeric reference resolves a string id.
pub fn resolve_plan<'a, I>(organization: &Organization, plans: I) -> Option<Plan>
where
    I: IntoIterator<Item = &'a Plan>,
{
    let reference = organization.plan.as_ref()?;
    if reference.as_str().is_empty() {
        return None;
    }

    plans
        .into_iter()
        .find(|plan| plan.id.as_str() == reference.as_str())
        .cloned()
}

impl DirectoryEntry {
    pub fn resolve<'a, I>(organization: Organization, plans: I) -> Self
    where
        I: IntoIterator<Item = &'a Plan>,
    {
        let plan = resolve_plan(&organization, plans);
        Self { organization, plan }
    }
}
