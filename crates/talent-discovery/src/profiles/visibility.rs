use serde::{Deserialize, Serialize};

use super::domain::JobseekerProfile;

pub const FULL_NAME_LABEL: &str = "Full name";
pub const CITY_LABEL: &str = "City";
pub const PREFERRED_ROLE_LABEL: &str = "Preferred role";
pub const BIO_LABEL: &str = "Bio";
pub const SKILLS_LABEL: &str = "At least one skill";

const DISCOVERABLE_MESSAGE: &str = "Your profile is visible to employers searching for talent.";
const DISCOVERY_OFF_MESSAGE: &str =
    "Discovery is turned off. Turn on \"Open to opportunities\" to appear in employer searches.";
const MISSING_ROLE_MESSAGE: &str = "Add a desired role so employers know what you are looking for.";
const MISSING_CITY_MESSAGE: &str = "Add your city so employers searching by location can find you.";

/// Result of the completeness check and the discoverability gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub is_complete: bool,
    pub missing_fields: Vec<String>,
    pub has_desired_role: bool,
    pub has_city: bool,
    pub is_discoverable: bool,
}

/// Decide whether a profile is complete and whether employers may discover it.
pub fn check_profile_completion(profile: &JobseekerProfile) -> CompletionStatus {
    let required = [
        (profile.has_full_name(), FULL_NAME_LABEL),
        (profile.has_city(), CITY_LABEL),
        (profile.has_preferred_role(), PREFERRED_ROLE_LABEL),
        (profile.has_bio(), BIO_LABEL),
        (profile.has_skills(), SKILLS_LABEL),
    ];

    let missing_fields: Vec<String> = required
        .iter()
        .filter(|(present, _)| !present)
        .map(|(_, label)| label.to_string())
        .collect();

    let is_complete = missing_fields.is_empty();
    let has_desired_role = profile.has_preferred_role();
    let has_city = profile.has_city();

    CompletionStatus {
        is_complete,
        missing_fields,
        has_desired_role,
        has_city,
        is_discoverable: is_complete
            && has_desired_role
            && has_city
            && profile.open_to_discovery,
    }
}

/// Every reason the profile is hidden, in display order. Empty when discoverable.
pub fn visibility_reasons(profile: &JobseekerProfile, status: &CompletionStatus) -> Vec<String> {
    let mut reasons = Vec::new();

    if !profile.open_to_discovery {
        reasons.push(DISCOVERY_OFF_MESSAGE.to_string());
    }
    if !status.is_complete {
        reasons.push(format!(
            "Complete your profile. Missing: {}.",
            status.missing_fields.join(", ")
        ));
    }
    if !status.has_desired_role {
        reasons.push(MISSING_ROLE_MESSAGE.to_string());
    }
    if !status.has_city {
        reasons.push(MISSING_CITY_MESSAGE.to_string());
    }

    reasons
}

/// Human readable account of the profile's discoverability.
pub fn explain_visibility(profile: &JobseekerProfile, status: &CompletionStatus) -> String {
    if status.is_discoverable {
        return DISCOVERABLE_MESSAGE.to_string();
    }

    visibility_reasons(profile, status).join(" ")
}
