//! Admission-gated creation of career postings.
//!
//! A submission is validated first, then the owning organization and its plan
//! are resolved, active postings are counted, and the admission check decides
//! whether one more posting fits before anything is persisted.

pub mod admission;
pub mod domain;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use admission::{
    evaluate, AdmissionDecision, DenialReason, PostingCapacity, DEFAULT_JOB_LIMIT,
};
pub use domain::{
    EmploymentType, IdentitySnapshot, Organization, OrganizationId, Plan, PlanId, Posting,
    PostingId, PostingLocation, PostingStatus, PostingSubmission, QuestionGroup, Salary,
    ScreeningQuestion, ScreeningSetting, WorkArrangement,
};
pub use repository::{
    resolve_plan, DirectoryEntry, OrganizationDirectory, PostingRepository, RepositoryError,
};
pub use router::career_router;
pub use seed::{DirectorySeed, SeedError};
pub use service::{CapacitySnapshot, CareerPostingService, PostingServiceError};
pub use validation::{draft_from_submission, PostingDraft, RequiredField, ValidationError};
