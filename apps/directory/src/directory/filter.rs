//! Filter engine — pure, stable, multi-field filtering over an in-memory list.
//!
//! Every criterion defaults to "no constraint". A profile is kept only when it
//! satisfies all of them; the input order is never changed.

use crate::models::Profile;

/// The combination of constraints applied by [`filter_profiles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Matched against name or email.
    pub text: String,
    pub skill: String,
    pub education: String,
    pub language: String,
    pub min_experience: u32,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.skill.is_empty()
            && self.education.is_empty()
            && self.language.is_empty()
            && self.min_experience == 0
    }

    /// Whether `profile` satisfies every criterion.
    pub fn matches(&self, profile: &Profile) -> bool {
        let text = needle(&self.text);
        let skill = needle(&self.skill);
        let education = needle(&self.education);
        let language = needle(&self.language);

        let text_ok = text.as_deref().map_or(true, |t| {
            contains_ci(&profile.name, t) || contains_ci(&profile.email, t)
        });
        let skill_ok = skill.as_deref().map_or(true, |s| any_contains(&profile.skills, s));
        let education_ok = education.as_deref().map_or(true, |e| {
            profile
                .education
                .as_deref()
                .map_or(false, |ed| contains_ci(ed, e))
        });
        let language_ok = language
            .as_deref()
            .map_or(true, |l| any_contains(&profile.languages, l));

        text_ok
            && skill_ok
            && education_ok
            && language_ok
            && profile.experience_years >= self.min_experience
    }
}

/// Returns the profiles matching `criteria`, in input order.
pub fn filter_profiles<'a>(profiles: &'a [Profile], criteria: &FilterCriteria) -> Vec<&'a Profile> {
    if criteria.is_empty() {
        return profiles.iter().collect();
    }
    profiles.iter().filter(|p| criteria.matches(p)).collect()
}

/// Parses the raw minimum-experience input. Blank or unparseable means 0.
pub fn parse_min_experience(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Lower-cased criterion, or `None` when it is empty. Whitespace is kept.
fn needle(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_lowercase())
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

fn any_contains(items: &[String], lowered_needle: &str) -> bool {
    items.iter().any(|item| contains_ci(item, lowered_needle))
}
