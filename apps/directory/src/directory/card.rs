use url::Url;

use crate::links::profile_link;
use crate::models::Profile;

/// Skills shown on a card before collapsing the rest into a `+N` badge.
const CARD_SKILL_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: String,
}

/// Display model of one directory result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub email: String,
    pub avatar: String,
    pub name: String,
    /// `<education or "Professional"> • <n>y Exp`
    pub headline: String,
    pub social: Vec<SocialLink>,
    pub skills: Vec<String>,
    /// Number of skills hidden behind the `+N` badge.
    pub hidden_skills: usize,
    pub detail_url: Option<Url>,
}

impl ProfileCard {
    pub fn from_profile(profile: &Profile, site: &Url) -> Self {
        let education = profile
            .education
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or("Professional");

        // linkedin and github always render; facebook only when set
        let mut social = vec![
            SocialLink {
                label: "LinkedIn",
                url: profile.linkedin.clone().unwrap_or_default(),
            },
            SocialLink {
                label: "GitHub",
                url: profile.github.clone().unwrap_or_default(),
            },
        ];
        if let Some(facebook) = profile.facebook.as_ref().filter(|f| !f.is_empty()) {
            social.push(SocialLink {
                label: "Facebook",
                url: facebook.clone(),
            });
        }

        Self {
            email: profile.email.clone(),
            avatar: profile.avatar_glyph().unwrap_or_default(),
            name: profile.name.clone(),
            headline: format!("{education} • {}y Exp", profile.experience_years),
            social,
            skills: profile.skills.iter().take(CARD_SKILL_LIMIT).cloned().collect(),
            hidden_skills: profile.skills.len().saturating_sub(CARD_SKILL_LIMIT),
            detail_url: profile_link(site, &profile.email).ok(),
        }
    }
}
