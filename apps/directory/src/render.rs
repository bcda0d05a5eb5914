//! Plain-text rendering of the directory, detail and CV parser pages for the
//! terminal.

use std::fmt::Write;

use crate::detail::ProfileDetail;
use crate::directory::{Listing, ProfileCard};
use crate::models::ParsedCv;

pub const NO_RESULTS: &str = "No profiles found.";
pub const PROFILE_NOT_FOUND: &str = "Profile not found.";
pub const NOT_FOUND: &str = "Not found";

pub fn render_listing(listing: &Listing) -> String {
    match listing {
        Listing::NoResults => format!("{NO_RESULTS}\n"),
        Listing::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_card(card: &ProfileCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {} <{}>", card.avatar, card.name, card.email);
    let _ = writeln!(out, "    {}", card.headline);

    let mut skills = card.skills.join(", ");
    if card.hidden_skills > 0 {
        let _ = write!(skills, " +{}", card.hidden_skills);
    }
    if !skills.is_empty() {
        let _ = writeln!(out, "    Skills: {skills}");
    }
    for link in card.social.iter().filter(|l| !l.url.is_empty()) {
        let _ = writeln!(out, "    {}: {}", link.label, link.url);
    }
    if let Some(url) = &card.detail_url {
        let _ = writeln!(out, "    View Profile: {url}");
    }
    out
}

pub fn render_detail(detail: &ProfileDetail) -> String {
    let profile = match detail {
        ProfileDetail::Found(p) => p,
        ProfileDetail::NotFound => return format!("{PROFILE_NOT_FOUND}\n"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.name);
    let _ = writeln!(out, "Email: {}", profile.email);
    let optional = [
        ("Phone", &profile.phone),
        ("Education", &profile.education),
        ("LinkedIn", &profile.linkedin),
        ("GitHub", &profile.github),
        ("Facebook", &profile.facebook),
        ("Portfolio", &profile.portfolio),
    ];
    for (label, value) in optional {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "{label}: {v}");
        }
    }
    let _ = writeln!(out, "Experience: {} years", profile.experience_years);
    let lists = [
        ("Skills", &profile.skills),
        ("Certifications", &profile.certifications),
        ("Languages", &profile.languages),
    ];
    for (label, items) in lists {
        if !items.is_empty() {
            let _ = writeln!(out, "{label}: {}", items.join(", "));
        }
    }
    if profile.cv_base64.as_deref().is_some_and(|cv| !cv.is_empty()) {
        let _ = writeln!(out, "CV: attached");
    }
    out
}

/// Every extracted field with a placeholder for what the parser missed,
/// followed by the raw result as pretty JSON.
pub fn render_parsed(parsed: &ParsedCv) -> String {
    let mut out = String::new();
    let text = [
        ("Name", &parsed.full_name),
        ("Email", &parsed.email),
        ("Phone", &parsed.phone),
    ];
    for (label, value) in text {
        let value = value.as_deref().filter(|v| !v.is_empty());
        let _ = writeln!(out, "{label}: {}", value.unwrap_or(NOT_FOUND));
    }
    let experience = match parsed.experience_years.filter(|&years| years > 0) {
        Some(years) => format!("{years} years"),
        None => NOT_FOUND.to_string(),
    };
    let _ = writeln!(out, "Experience: {experience}");
    let education = parsed.education.as_deref().filter(|v| !v.is_empty());
    let _ = writeln!(out, "Education: {}", education.unwrap_or(NOT_FOUND));

    let lists = [
        ("Skills", "skills", &parsed.skills),
        ("Certifications", "certifications", &parsed.certifications),
        ("Languages", "languages", &parsed.languages),
    ];
    for (label, noun, items) in lists {
        let line = match items.as_deref().filter(|items| !items.is_empty()) {
            Some(items) => items.join(", "),
            None => format!("No {noun} detected"),
        };
        let _ = writeln!(out, "{label}: {line}");
    }

    let _ = writeln!(out, "\nJSON:\n{}", parsed_json(parsed));
    out
}

/// The parser result as the pretty JSON shown (and copied) by `parse`.
pub fn parsed_json(parsed: &ParsedCv) -> String {
    serde_json::to_string_pretty(parsed).unwrap_or_default()
}
