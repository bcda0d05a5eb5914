use url::Url;

use crate::links::email_from_link;
use crate::models::Profile;
use crate::store::ProfileStore;

/// The profile detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDetail {
    Found(Profile),
    NotFound,
}

impl ProfileDetail {
    /// Loads the profile named by a `profile.html?email=` link. A missing
    /// parameter, an unknown email, and a failed read all render not-found.
    pub async fn from_link(store: &dyn ProfileStore, link: &Url) -> Self {
        match email_from_link(link) {
            Some(email) => Self::for_email(store, &email).await,
            None => ProfileDetail::NotFound,
        }
    }

    pub async fn for_email(store: &dyn ProfileStore, email: &str) -> Self {
        match store.find_by_email(email).await {
            Some(profile) => ProfileDetail::Found(profile),
            None => ProfileDetail::NotFound,
        }
    }
}
