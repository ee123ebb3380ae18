use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Organization, OrganizationId, Plan, PlanId, Posting};

/// Snapshot of plans, organizations, and existing postings used to hydrate
/// in-memory collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub postings: Vec<Posting>,
}

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicatePlan(PlanId),
    DuplicateOrganization(OrganizationId),
    DuplicatePosting(String),
    UnknownOrganization {
        posting: String,
        organization: OrganizationId,
    },
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Io(err) => write!(f, "failed to read directory seed: {}", err),
            SeedError::Json(err) => write!(f, "invalid directory seed: {}", err),
            SeedError::DuplicatePlan(id) => {
                write!(f, "plan '{}' appears more than once", id.as_str())
            }
            SeedError::DuplicateOrganization(id) => {
                write!(f, "organization '{}' appears more than once", id.as_str())
            }
            SeedError::DuplicatePosting(id) => {
                write!(f, "posting '{}' appears more than once", id)
            }
            SeedError::UnknownOrganization {
                posting,
                organization,
            } => write!(
                f,
                "posting '{}' belongs to unknown organization '{}'",
                posting,
                organization.as_str()
            ),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(err) => Some(err),
            SeedError::Json(err) => Some(err),
            SeedError::DuplicatePlan(_)
            | SeedError::DuplicateOrganization(_)
            | SeedError::DuplicatePosting(_)
            | SeedError::UnknownOrganization { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl DirectorySeed {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeedError> {
        let seed: DirectorySeed = serde_json::from_reader(reader)?;
        seed.check()?;
        Ok(seed)
    }

    fn check(&self) -> Result<(), SeedError> {
        let mut plans = HashSet::new();
        for plan in &self.plans {
            if !plans.insert(&plan.id) {
                return Err(SeedError::DuplicatePlan(plan.id.clone()));
            }
        }

        let mut organizations = HashSet::new();
        for organization in &self.organizations {
            if !organizations.insert(&organization.id) {
                return Err(SeedError::DuplicateOrganization(organization.id.clone()));
            }
        }

        let mut postings = HashSet::new();
        for posting in &self.postings {
            if !postings.insert(&posting.id) {
                return Err(SeedError::DuplicatePosting(posting.id.0.clone()));
            }
            if !organizations.contains(&posting.organization_id) {
                return Err(SeedError::UnknownOrganization {
                    posting: posting.id.0.clone(),
                    organization: posting.organization_id.clone(),
                });
            }
        }

        Ok(())
    }
}
