use career_posting::careers::{
    DirectoryEntry, DirectorySeed, Organization, OrganizationDirectory, OrganizationId, Plan,
    Posting, PostingRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only organization and plan records; the plan join happens per lookup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOrganizationDirectory {
    plans: Arc<Vec<Plan>>,
    organizations: Arc<HashMap<OrganizationId, Organization>>,
}

impl InMemoryOrganizationDirectory {
    pub(crate) fn from_seed(seed: &DirectorySeed) -> Self {
        let organizations = seed
            .organizations
            .iter()
            .map(|organization| (organization.id.clone(), organization.clone()))
            .collect();

        Self {
            plans: Arc::new(seed.plans.clone()),
            organizations: Arc::new(organizations),
        }
    }

    pub(crate) fn organization_count(&self) -> usize {
        self.organizations.len()
    }
}

impl OrganizationDirectory for InMemoryOrganizationDirectory {
    fn lookup(&self, id: &OrganizationId) -> Result<DirectoryEntry, RepositoryError> {
        let organization = self
            .organizations
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        Ok(DirectoryEntry::resolve(organization, self.plans.iter()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPostingRepository {
    postings: Arc<Mutex<Vec<Posting>>>,
}

impl InMemoryPostingRepository {
    pub(crate) fn from_seed(seed: &DirectorySeed) -> Self {
        Self {
            postings: Arc::new(Mutex::new(seed.postings.clone())),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.postings.lock().expect("repository mutex poisoned").len()
    }
}

impl PostingRepository for InMemoryPostingRepository {
    fn count_active(&self, organization: &OrganizationId) -> Result<u64, RepositoryError> {
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|posting| &posting.organization_id == organization && posting.is_active())
            .count() as u64)
    }

    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == posting.id) {
            return Err(RepositoryError::Unavailable(format!(
                "duplicate posting id {}",
                posting.id.0
            )));
        }
        guard.push(posting.clone());
        Ok(posting)
    }
}
