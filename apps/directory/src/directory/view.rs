use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::directory::card::ProfileCard;
use crate::directory::filter::{filter_profiles, parse_min_experience, FilterCriteria};
use crate::links::profile_link;
use crate::models::Profile;
use crate::store::ProfileStore;

/// How long the share confirmation stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
pub const SHARE_CONFIRMATION: &str = "Profile link copied!";

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// One change on one of the five filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterInput {
    Text(String),
    Skill(String),
    Education(String),
    Language(String),
    /// Raw text of the minimum-experience control.
    MinExperience(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    NoResults,
    Cards(Vec<ProfileCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Link is on the clipboard and a toast is showing.
    Copied(Url),
    /// Clipboard refused; the link must be shown for manual copying.
    Fallback(Url),
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown_at.elapsed() < TOAST_DURATION
    }
}

/// The directory page: owns the loaded list and the current criteria.
/// The list is replaced wholesale on load and only read while filtering.
pub struct DirectoryView {
    site: Url,
    profiles: Vec<Profile>,
    criteria: FilterCriteria,
    toast: Option<Toast>,
}

impl DirectoryView {
    pub fn new(site: Url) -> Self {
        Self {
            site,
            profiles: Vec::new(),
            criteria: FilterCriteria::default(),
            toast: None,
        }
    }

    /// Fetches the full list once. A failed fetch leaves an empty directory.
    pub async fn load(&mut self, store: &dyn ProfileStore) -> Listing {
        self.profiles = store.list_all().await;
        info!("Directory loaded with {} profiles", self.profiles.len());
        self.render()
    }

    /// Applies one control change and re-renders the whole result set.
    pub fn input(&mut self, input: FilterInput) -> Listing {
        match input {
            FilterInput::Text(v) => self.criteria.text = v,
            FilterInput::Skill(v) => self.criteria.skill = v,
            FilterInput::Education(v) => self.criteria.education = v,
            FilterInput::Language(v) => self.criteria.language = v,
            FilterInput::MinExperience(v) => self.criteria.min_experience = parse_min_experience(&v),
        }
        debug!("Filter criteria now {:?}", self.criteria);
        self.render()
    }

    pub fn results(&self) -> Vec<&Profile> {
        filter_profiles(&self.profiles, &self.criteria)
    }

    pub fn render(&self) -> Listing {
        let results = self.results();
        if results.is_empty() {
            return Listing::NoResults;
        }
        Listing::Cards(
            results
                .into_iter()
                .map(|p| ProfileCard::from_profile(p, &self.site))
                .collect(),
        )
    }

    /// Copies the profile's share link. On success a toast replaces any
    /// visible one; on clipboard refusal the caller shows the link instead.
    pub fn share(
        &mut self,
        email: &str,
        clipboard: &mut dyn Clipboard,
    ) -> Result<ShareOutcome, url::ParseError> {
        let url = profile_link(&self.site, email)?;
        match clipboard.write_text(url.as_str()) {
            Ok(()) => {
                self.toast = Some(Toast::new(SHARE_CONFIRMATION));
                Ok(ShareOutcome::Copied(url))
            }
            Err(e) => {
                warn!("Failed to copy share link: {e}");
                Ok(ShareOutcome::Fallback(url))
            }
        }
    }

    /// The toast, if one is still within its display window.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible())
    }
}
