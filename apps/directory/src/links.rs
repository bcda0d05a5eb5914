//! Page addressing. The detail page is reached through `profile.html?email=`,
//! which is the only state passed between pages.

use url::Url;

pub const INDEX_PAGE: &str = "index.html";
pub const PROFILE_PAGE: &str = "profile.html";
const EMAIL_PARAM: &str = "email";

/// Where a finished workflow sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Index,
    ProfileDetail { email: String },
}

impl Navigation {
    pub fn to_url(&self, site: &Url) -> Result<Url, url::ParseError> {
        match self {
            Navigation::Index => site.join(INDEX_PAGE),
            Navigation::ProfileDetail { email } => profile_link(site, email),
        }
    }
}

/// Shareable link to a profile's detail page, email URL-encoded in the query.
pub fn profile_link(site: &Url, email: &str) -> Result<Url, url::ParseError> {
    let mut url = site.join(PROFILE_PAGE)?;
    url.query_pairs_mut().clear().append_pair(EMAIL_PARAM, email);
    Ok(url)
}

/// Extracts the email carried by a detail link. Blank values count as missing.
pub fn email_from_link(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == EMAIL_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|email| !email.is_empty())
}
