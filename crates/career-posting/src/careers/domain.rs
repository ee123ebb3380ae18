use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for tenant organizations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

impl OrganizationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for OrganizationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_reference(deserializer).map(Self)
    }
}

/// Identifier wrapper for subscription plans.
///
/// Stored plan references are not consistently typed (numeric ids next to
/// string ids), so both sides deserialize into the same trimmed string form
/// and compare with plain equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl PlanId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PlanId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_reference(deserializer).map(Self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn deserialize_reference<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let normalized = match RawReference::deserialize(deserializer)? {
        RawReference::Text(text) => text.trim().to_string(),
        RawReference::Signed(value) => value.to_string(),
        RawReference::Unsigned(value) => value.to_string(),
    };
    Ok(normalized)
}

/// Tenant account owning postings and subscribed to a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<PlanId>,
    /// Purchased capacity on top of the plan limit. Negative values are
    /// tolerated on read and count as zero.
    #[serde(default)]
    pub extra_job_slots: Option<i64>,
}

/// Subscription tier defining the base job-posting limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job_limit: Option<u64>,
}

/// Identifier wrapper for persisted career postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(pub String);

/// Publication state of a posting. Only `Active` postings consume plan capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    #[default]
    Active,
    #[serde(alias = "unpublished")]
    Inactive,
}

impl PostingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PostingStatus::Active => "active",
            PostingStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkArrangement {
    #[serde(alias = "on_site", alias = "on-site")]
    Onsite,
    Remote,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

/// Whether screening answers are reviewed by a recruiter or scored automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningSetting {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningQuestion {
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
}

/// Screening questions sharing a category, kept in the order the recruiter arranged them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub category: String,
    #[serde(default)]
    pub questions: Vec<ScreeningQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingLocation {
    pub country: Option<String>,
    pub province: Option<String>,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub minimum: Option<u64>,
    pub maximum: Option<u64>,
    pub negotiable: bool,
}

/// Point-in-time copy of the user who created or last edited a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Inbound creation request as sent by the posting wizard.
///
/// Required fields are modelled as options so a missing field reaches the
/// validator instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSubmission {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionGroup>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_arrangement: Option<WorkArrangement>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub work_arrangement_remarks: Option<String>,
    #[serde(default)]
    pub screening_setting: Option<ScreeningSetting>,
    #[serde(default)]
    pub require_video: bool,
    #[serde(default)]
    pub salary_min: Option<u64>,
    #[serde(default)]
    pub salary_max: Option<u64>,
    #[serde(default)]
    pub salary_negotiable: bool,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub created_by: Option<IdentitySnapshot>,
    #[serde(default)]
    pub updated_by: Option<IdentitySnapshot>,
    #[serde(default)]
    pub status: Option<PostingStatus>,
}

/// Persisted career posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub id: PostingId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionGroup>,
    #[serde(flatten)]
    pub location: PostingLocation,
    pub work_arrangement: WorkArrangement,
    pub work_arrangement_remarks: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub screening_setting: Option<ScreeningSetting>,
    pub require_video: bool,
    pub salary: Salary,
    pub status: PostingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub created_by: Option<IdentitySnapshot>,
    pub updated_by: Option<IdentitySnapshot>,
}

impl Posting {
    pub fn is_active(&self) -> bool {
        self.status == PostingStatus::Active
    }
}
