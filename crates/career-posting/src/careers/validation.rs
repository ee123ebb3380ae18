use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    EmploymentType, IdentitySnapshot, OrganizationId, Posting, PostingId, PostingLocation,
    PostingStatus, PostingSubmission, QuestionGroup, Salary, ScreeningSetting, WorkArrangement,
};

/// Fields a creation request cannot omit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    Description,
    Questions,
    Location,
    WorkArrangement,
    OrganizationId,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Title => "title",
            RequiredField::Description => "description",
            RequiredField::Questions => "questions",
            RequiredField::Location => "location",
            RequiredField::WorkArrangement => "work_arrangement",
            RequiredField::OrganizationId => "organization_id",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural problems detected before any collaborator is consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
    #[error("salary minimum {minimum} exceeds maximum {maximum}")]
    SalaryRange { minimum: u64, maximum: u64 },
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[RequiredField] {
        match self {
            ValidationError::MissingFields(fields) => fields,
            ValidationError::SalaryRange { .. } => &[],
        }
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Submission that passed validation, ready to become a posting once admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingDraft {
    pub organization_id: OrganizationId,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionGroup>,
    pub location: PostingLocation,
    pub work_arrangement: WorkArrangement,
    pub work_arrangement_remarks: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub screening_setting: Option<ScreeningSetting>,
    pub require_video: bool,
    pub salary: Salary,
    pub status: PostingStatus,
    pub created_by: Option<IdentitySnapshot>,
    pub updated_by: Option<IdentitySnapshot>,
}

impl PostingDraft {
    pub fn into_posting(self, id: PostingId, now: DateTime<Utc>) -> Posting {
        let updated_by = self.updated_by.or_else(|| self.created_by.clone());

        Posting {
            id,
            organization_id: self.organization_id,
            title: self.title,
            description: self.description,
            questions: self.questions,
            location: self.location,
            work_arrangement: self.work_arrangement,
            work_arrangement_remarks: self.work_arrangement_remarks,
            employment_type: self.employment_type,
            screening_setting: self.screening_setting,
            require_video: self.require_video,
            salary: self.salary,
            status: self.status,
            created_at: now,
            updated_at: now,
            last_activity_at: now,
            created_by: self.created_by,
            updated_by,
        }
    }
}

/// Turn a raw submission into a draft, reporting every missing field at once.
pub fn draft_from_submission(
    submission: PostingSubmission,
) -> Result<PostingDraft, ValidationError> {
    let mut missing = Vec::new();

    let title = non_blank(submission.title);
    if title.is_none() {
        missing.push(RequiredField::Title);
    }

    let description = submission
        .description
        .filter(|markup| has_visible_text(markup));
    if description.is_none() {
        missing.push(RequiredField::Description);
    }

    let questions = normalize_questions(submission.questions);
    if questions.is_empty() {
        missing.push(RequiredField::Questions);
    }

    let location = non_blank(submission.location);
    if location.is_none() {
        missing.push(RequiredField::Location);
    }

    if submission.work_arrangement.is_none() {
        missing.push(RequiredField::WorkArrangement);
    }

    let organization_id = submission
        .organization_id
        .filter(|id| !id.as_str().is_empty());
    if organization_id.is_none() {
        missing.push(RequiredField::OrganizationId);
    }

    let (
        Some(title),
        Some(description),
        Some(location),
        Some(work_arrangement),
        Some(organization_id),
    ) = (
        title,
        description,
        location,
        submission.work_arrangement,
        organization_id,
    )
    else {
        return Err(ValidationError::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if let (Some(minimum), Some(maximum)) = (submission.salary_min, submission.salary_max) {
        if minimum > maximum {
            return Err(ValidationError::SalaryRange { minimum, maximum });
        }
    }

    Ok(PostingDraft {
        organization_id,
        title,
        description,
        questions,
        location: PostingLocation {
            country: non_blank(submission.country),
            province: non_blank(submission.province),
            location,
        },
        work_arrangement,
        work_arrangement_remarks: non_blank(submission.work_arrangement_remarks),
        employment_type: submission.employment_type,
        screening_setting: submission.screening_setting,
        require_video: submission.require_video,
        salary: Salary {
            minimum: submission.salary_min,
            maximum: submission.salary_max,
            negotiable: submission.salary_negotiable,
        },
        status: submission.status.unwrap_or_default(),
        created_by: submission.created_by,
        updated_by: submission.updated_by,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Drop blank prompts and the groups left empty by that, keeping order.
fn normalize_questions(groups: Vec<QuestionGroup>) -> Vec<QuestionGroup> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            group
                .questions
                .retain(|question| !question.prompt.trim().is_empty());
            if group.questions.is_empty() {
                None
            } else {
                Some(group)
            }
        })
        .collect()
}

/// Rich-text editors emit markup such as `<p><br></p>` for an empty document.
/// A `<` that cannot open a tag, or a tag that never closes, is plain text.
pub(crate) fn has_visible_text(markup: &str) -> bool {
    let mut text = String::with_capacity(markup.len());
    let mut tag_start = None;
    let mut chars = markup.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if tag_start.is_some() {
            if ch == '>' {
                tag_start = None;
            }
            continue;
        }

        let opens_tag = ch == '<'
            && chars.peek().is_some_and(|&(_, next)| {
                next.is_ascii_alphabetic() || next == '/' || next == '!'
            });
        if opens_tag {
            tag_start = Some(index);
        } else {
            text.push(ch);
        }
    }

    if let Some(start) = tag_start {
        text.push_str(&markup[start..]);
    }

    let text = NON_BREAKING_SPACES
        .iter()
        .fold(text, |text, entity| text.replace(entity, " "));
    !text.trim().is_empty()
}

const NON_BREAKING_SPACES: [&str; 4] = ["&nbsp;", "&#160;", "&#xa0;", "&#xA0;"];
