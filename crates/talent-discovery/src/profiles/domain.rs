use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for jobseeker profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Which optional CV sections currently hold content.
///
/// These are derived from the CV document and are read-only from the point of view of ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvSections {
    pub experience: bool,
    pub education: bool,
    pub certifications: bool,
    pub projects: bool,
    pub publications: bool,
    pub languages: bool,
}

/// Jobseeker profile fields consumed by the visibility gate and the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobseekerProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub preferred_role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// `None` when the stored timestamp was missing or unparseable.
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open_to_discovery: bool,
    #[serde(default)]
    pub sections: CvSections,
}

impl JobseekerProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ProfileId(id.into()),
            full_name: None,
            city: None,
            preferred_role: None,
            bio: None,
            skills: Vec::new(),
            last_updated: None,
            open_to_discovery: false,
            sections: CvSections::default(),
        }
    }

    pub fn has_full_name(&self) -> bool {
        has_text(self.full_name.as_deref())
    }

    pub fn has_city(&self) -> bool {
        has_text(self.city.as_deref())
    }

    pub fn has_preferred_role(&self) -> bool {
        has_text(self.preferred_role.as_deref())
    }

    pub fn has_bio(&self) -> bool {
        has_text(self.bio.as_deref())
    }

    pub fn has_skills(&self) -> bool {
        self.skills.iter().any(|skill| has_text(Some(skill)))
    }
}

/// Employer search input. Immutable for the duration of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub keywords: String,
    pub city: Option<String>,
    pub desired_role: Option<String>,
    pub skills: Option<String>,
    /// Accepted for compatibility with the search form; not consulted by filtering or scoring.
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
}

impl SearchQuery {
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Self::default()
        }
    }
}

/// Absent, empty, and whitespace-only strings all count as missing.
pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
