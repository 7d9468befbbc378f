use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::CvSections;

/// Identifier wrapper for CV documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CvId(pub String);

/// Identifier wrapper for employer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployerId(pub String);

/// Publication state of a CV. Drafts are editable, active CVs are visible and locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvState {
    Draft,
    Active,
}

impl CvState {
    pub const fn label(self) -> &'static str {
        match self {
            CvState::Draft => "draft",
            CvState::Active => "active",
        }
    }

    const fn for_visibility(is_visible: bool) -> Self {
        if is_visible {
            CvState::Active
        } else {
            CvState::Draft
        }
    }
}

/// Recorded state of one CV.
///
/// `state` is always `Active` exactly when `is_visible` is set; both only move together
/// through [`CvStateInfo::with_visibility`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CvStateInfo {
    cv_id: CvId,
    state: CvState,
    last_updated: DateTime<Utc>,
    is_visible: bool,
}

impl CvStateInfo {
    pub fn draft(cv_id: CvId, created_at: DateTime<Utc>) -> Self {
        Self {
            cv_id,
            state: CvState::Draft,
            last_updated: created_at,
            is_visible: false,
        }
    }

    pub fn cv_id(&self) -> &CvId {
        &self.cv_id
    }

    pub fn state(&self) -> CvState {
        self.state
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_edit_locked(&self) -> bool {
        self.is_visible
    }

    pub(crate) fn with_visibility(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self.state = CvState::for_visibility(is_visible);
        self
    }

    pub(crate) fn touched(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = at;
        self
    }
}

/// Optional CV sections that can carry entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvSection {
    Experience,
    Education,
    Certifications,
    Projects,
    Publications,
    Languages,
}

/// Displayable CV content as captured in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvContent {
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub preferred_role: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub sections: BTreeMap<CvSection, Vec<String>>,
}

impl CvContent {
    /// Section presence flags as the ranking engine sees them.
    pub fn section_flags(&self) -> CvSections {
        let populated = |section: CvSection| {
            self.sections
                .get(&section)
                .map(|entries| entries.iter().any(|entry| !entry.trim().is_empty()))
                .unwrap_or(false)
        };

        CvSections {
            experience: populated(CvSection::Experience),
            education: populated(CvSection::Education),
            certifications: populated(CvSection::Certifications),
            projects: populated(CvSection::Projects),
            publications: populated(CvSection::Publications),
            languages: populated(CvSection::Languages),
        }
    }
}

/// Immutable copy of a CV taken when an employer saves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvSnapshot {
    pub cv_id: CvId,
    pub employer_id: EmployerId,
    /// Starts at 1 and increases per (CV, employer) pair.
    pub version: u32,
    pub content: CvContent,
    pub created_at: DateTime<Utc>,
}
