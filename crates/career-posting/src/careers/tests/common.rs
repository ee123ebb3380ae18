use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::careers::domain::{
    EmploymentType, IdentitySnapshot, Organization, OrganizationId, Plan, PlanId, Posting,
    PostingStatus, PostingSubmission, QuestionGroup, ScreeningQuestion, WorkArrangement,
};
use crate::careers::repository::{
    DirectoryEntry, OrganizationDirectory, PostingRepository, RepositoryError,
};
use crate::careers::{career_router, CareerPostingService};

pub(super) fn plan(id: &str, job_limit: Option<u64>) -> Plan {
    Plan {
        id: PlanId::new(id),
        name: Some(format!("Plan {id}")),
        job_limit,
    }
}

pub(super) fn organization(
    id: &str,
    plan: Option<&str>,
    extra_job_slots: Option<i64>,
) -> Organization {
    Organization {
        id: OrganizationId::new(id),
        name: Some(format!("Org {id}")),
        plan: plan.map(PlanId::new),
        extra_job_slots,
    }
}

pub(super) fn entry(job_limit: Option<u64>, extra_job_slots: Option<i64>) -> DirectoryEntry {
    DirectoryEntry {
        organization: organization("org-entry", Some("plan-entry"), extra_job_slots),
        plan: job_limit.map(|limit| plan("plan-entry", Some(limit))),
    }
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn recruiter() -> IdentitySnapshot {
    IdentitySnapshot {
        name: "Dana Reyes".to_string(),
        image: Some("https://cdn.example.com/avatars/dana.png".to_string()),
        email: Some("dana@example.com".to_string()),
    }
}

pub(super) fn submission(organization_id: &str) -> PostingSubmission {
    PostingSubmission {
        title: Some("Backend Engineer".to_string()),
        description: Some("<p>Own the <strong>payments</strong> platform.</p>".to_string()),
        questions: vec![
            QuestionGroup {
                category: "Experience".to_string(),
                questions: vec![ScreeningQuestion {
                    prompt: "Years of Rust experience?".to_string(),
                    required: true,
                }],
            },
            QuestionGroup {
                category: "Logistics".to_string(),
                questions: vec![ScreeningQuestion {
                    prompt: "Earliest start date?".to_string(),
                    required: false,
                }],
            },
        ],
        location: Some("Makati".to_string()),
        work_arrangement: Some(WorkArrangement::Hybrid),
        employment_type: Some(EmploymentType::FullTime),
        salary_min: Some(90_000),
        salary_max: Some(120_000),
        country: Some("Philippines".to_string()),
        province: Some("Metro Manila".to_string()),
        organization_id: Some(OrganizationId::new(organization_id)),
        created_by: Some(recruiter()),
        ..PostingSubmission::default()
    }
}

/// Directory over fixed plans and organizations, counting lookups.
#[derive(Default)]
pub(super) struct MemoryDirectory {
    plans: Vec<Plan>,
    organizations: HashMap<OrganizationId, Organization>,
    lookups: AtomicUsize,
}

impl MemoryDirectory {
    pub(super) fn new(plans: Vec<Plan>, organizations: Vec<Organization>) -> Self {
        Self {
            plans,
            organizations: organizations
                .into_iter()
                .map(|organization| (organization.id.clone(), organization))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl OrganizationDirectory for MemoryDirectory {
    fn lookup(&self, id: &OrganizationId) -> Result<DirectoryEntry, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let organization = self
            .organizations
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;
        Ok(DirectoryEntry::resolve(organization, &self.plans))
    }
}

/// Posting store counting collaborator calls.
#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) postings: Mutex<Vec<Posting>>,
    counts: AtomicUsize,
    inserts: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn with_postings(postings: Vec<Posting>) -> Self {
        Self {
            postings: Mutex::new(postings),
            ..Self::default()
        }
    }

    pub(super) fn counts(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }

    pub(super) fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub(super) fn stored(&self) -> Vec<Posting> {
        self.postings.lock().expect("repository mutex poisoned").clone()
    }
}

impl PostingRepository for MemoryRepository {
    fn count_active(&self, organization: &OrganizationId) -> Result<u64, RepositoryError> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|posting| &posting.organization_id == organization && posting.is_active())
            .count() as u64)
    }

    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.postings
            .lock()
            .expect("repository mutex poisoned")
            .push(posting.clone());
        Ok(posting)
    }
}

pub(super) struct UnavailableRepository;

impl PostingRepository for UnavailableRepository {
    fn count_active(&self, _organization: &OrganizationId) -> Result<u64, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn insert(&self, _posting: Posting) -> Result<Posting, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) struct UnavailableDirectory;

impl OrganizationDirectory for UnavailableDirectory {
    fn lookup(&self, _id: &OrganizationId) -> Result<DirectoryEntry, RepositoryError> {
        Err(RepositoryError::Unavailable("directory replica offline".to_string()))
    }
}

/// `org-growth` is on a five-posting plan; `org-free` has no plan at all.
pub(super) fn directory() -> MemoryDirectory {
    MemoryDirectory::new(
        vec![plan("5", Some(5)), plan("plan-empty", None)],
        vec![
            organization("org-growth", Some("5"), Some(0)),
            organization("org-free", None, None),
            organization("org-boosted", Some("5"), Some(2)),
        ],
    )
}

/// Existing postings for an organization with the given status.
pub(super) fn existing_postings(
    organization_id: &str,
    count: usize,
    status: PostingStatus,
) -> Vec<Posting> {
    (0..count)
        .map(|index| {
            let draft = crate::careers::draft_from_submission(submission(organization_id))
                .expect("fixture submission is valid");
            let mut posting = draft.into_posting(
                crate::careers::PostingId(format!("seed-{organization_id}-{index}")),
                now(),
            );
            posting.status = status;
            posting
        })
        .collect()
}

pub(super) fn build_service(
    postings: Vec<Posting>,
) -> (
    CareerPostingService<MemoryDirectory, MemoryRepository>,
    Arc<MemoryDirectory>,
    Arc<MemoryRepository>,
) {
    let directory = Arc::new(directory());
    let repository = Arc::new(MemoryRepository::with_postings(postings));
    let service = CareerPostingService::new(directory.clone(), repository.clone());
    (service, directory, repository)
}

pub(super) fn router_with_service(
    service: CareerPostingService<MemoryDirectory, MemoryRepository>,
) -> axum::Router {
    career_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
