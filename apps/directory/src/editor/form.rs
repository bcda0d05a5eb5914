use crate::errors::ValidationError;
use crate::models::{ParsedCv, Profile};

/// A form field that parse-assist may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Experience,
    Education,
    Skills,
    Certifications,
    Languages,
}

/// Editable values of the profile form, held as the text the user sees.
/// The email is fixed once the form exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    email: String,
    pub name: String,
    pub linkedin: String,
    pub github: String,
    pub facebook: String,
    pub portfolio: String,
    pub phone: String,
    /// Raw experience input; parsed on submit.
    pub experience: String,
    pub education: String,
    /// Comma-separated.
    pub skills: String,
    pub certifications: String,
    pub languages: String,
    /// Data URL of the CV attached to the profile, existing or newly selected.
    pub cv_data: Option<String>,
}

impl ProfileForm {
    /// Create mode: everything empty, experience 0.
    pub fn blank(email: &str) -> Self {
        Self {
            email: email.to_string(),
            experience: "0".to_string(),
            ..Default::default()
        }
    }

    /// Edit mode: pre-populated from the stored profile.
    pub fn from_profile(email: &str, profile: &Profile) -> Self {
        Self {
            email: email.to_string(),
            name: profile.name.clone(),
            linkedin: profile.linkedin.clone().unwrap_or_default(),
            github: profile.github.clone().unwrap_or_default(),
            facebook: profile.facebook.clone().unwrap_or_default(),
            portfolio: profile.portfolio.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            experience: profile.experience_years.to_string(),
            education: profile.education.clone().unwrap_or_default(),
            skills: join_list(&profile.skills),
            certifications: join_list(&profile.certifications),
            languages: join_list(&profile.languages),
            cv_data: profile.cv_base64.clone().filter(|cv| !cv.is_empty()),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Overwrites only the fields the parser supplied and returns them.
    /// Blank strings and empty lists count as not supplied; the parsed
    /// email is never applied.
    pub fn apply_parsed(&mut self, parsed: &ParsedCv) -> Vec<FormField> {
        let mut changed = Vec::new();

        if let Some(name) = supplied(&parsed.full_name) {
            self.name = name.to_string();
            changed.push(FormField::Name);
        }
        if let Some(phone) = supplied(&parsed.phone) {
            self.phone = phone.to_string();
            changed.push(FormField::Phone);
        }
        if let Some(years) = parsed.experience_years {
            self.experience = years.to_string();
            changed.push(FormField::Experience);
        }
        if let Some(education) = supplied(&parsed.education) {
            self.education = education.to_string();
            changed.push(FormField::Education);
        }
        if let Some(skills) = supplied_list(&parsed.skills) {
            self.skills = join_list(skills);
            changed.push(FormField::Skills);
        }
        if let Some(certs) = supplied_list(&parsed.certifications) {
            self.certifications = join_list(certs);
            changed.push(FormField::Certifications);
        }
        if let Some(languages) = supplied_list(&parsed.languages) {
            self.languages = join_list(languages);
            changed.push(FormField::Languages);
        }

        changed
    }

    /// Serializes the form into the profile sent to the store.
    pub fn to_profile(&self) -> Result<Profile, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        Ok(Profile {
            email: self.email.clone(),
            name: name.to_string(),
            linkedin: optional(&self.linkedin),
            github: optional(&self.github),
            facebook: optional(&self.facebook),
            portfolio: optional(&self.portfolio),
            phone: optional(&self.phone),
            experience_years: leading_years(&self.experience),
            education: optional(&self.education),
            skills: split_list(&self.skills),
            certifications: split_list(&self.certifications),
            languages: split_list(&self.languages),
            cv_base64: self.cv_data.clone(),
        })
    }
}

/// `"Go, SQL"` for `["Go", "SQL"]`.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Splits on commas, trims, and drops empty entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the leading digits of the experience input: `"7 years"` is 7 and
/// `"3.5"` is 3. No leading digits, or a negative number, means 0.
fn leading_years(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    raw[..end].parse().unwrap_or(if end > 0 { u32::MAX } else { 0 })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn supplied_list(value: &Option<Vec<String>>) -> Option<&[String]> {
    value.as_deref().filter(|items| !items.is_empty())
}
