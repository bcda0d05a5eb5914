//! Profile store — the client side of the backend's `/Profile` resource.
//!
//! No caching: every call is a fresh round trip, no retry, transport-default
//! timeout. Read paths have fail-soft helpers (`list_all`, `find_by_email`)
//! that log and degrade; the write path always propagates its error.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::models::Profile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Status { status: u16 },

    #[error("API base URL '{0}' cannot carry path segments")]
    InvalidBaseUrl(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `GET /Profile`.
    async fn fetch_all(&self) -> Result<Vec<Profile>, StoreError>;

    /// `GET /Profile/{email}`. A 404 is `Ok(None)`; anything else non-2xx is an error.
    async fn get_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError>;

    /// `POST /Profile`. Creates or replaces the profile keyed by its email.
    async fn upsert(&self, profile: &Profile) -> Result<(), StoreError>;

    /// All profiles, or an empty list on any failure. Callers cannot tell
    /// "no profiles" from "fetch failed".
    async fn list_all(&self) -> Vec<Profile> {
        match self.fetch_all().await {
            Ok(profiles) => profiles,
            Err(e) => {
                error!("Error fetching profiles: {e}");
                Vec::new()
            }
        }
    }

    /// The profile for `email`, with every failure collapsed into `None`.
    async fn find_by_email(&self, email: &str) -> Option<Profile> {
        match self.get_by_email(email).await {
            Ok(found) => found,
            Err(e) => {
                error!("Error fetching profile {email}: {e}");
                None
            }
        }
    }
}

/// Appends path segments to the API base, keeping any base path (`/api`).
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(segments);
    Some(url)
}

/// reqwest-backed store talking to `{api_url}/Profile`.
#[derive(Clone)]
pub struct HttpProfileStore {
    client: Client,
    base: Url,
}

impl HttpProfileStore {
    pub fn new(base: Url) -> Result<Self, StoreError> {
        let client = Client::builder().build()?;
        Ok(Self { client, base })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        endpoint(&self.base, segments).ok_or_else(|| StoreError::InvalidBaseUrl(self.base.to_string()))
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch_all(&self) -> Result<Vec<Profile>, StoreError> {
        let response = self.client.get(self.url(&["Profile"])?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        let profiles: Vec<Profile> = response.json().await?;
        debug!("Fetched {} profiles", profiles.len());
        Ok(profiles)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        let response = self
            .client
            .get(self.url(&["Profile", email])?)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No profile for {email}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        Ok(Some(response.json().await?))
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.url(&["Profile"])?)
            .json(profile)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            error!("Error saving profile {}: status {}", profile.email, status);
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        debug!("Saved profile {}", profile.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{profile, MockBackend};

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://localhost:5240/api").unwrap();
        let url = endpoint(&base, &["Profile", "ada@gmail.com"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5240/api/Profile/ada@gmail.com");

        let slashed = Url::parse("http://localhost:5240/api/").unwrap();
        let url = endpoint(&slashed, &["Profile"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5240/api/Profile");
    }

    #[test]
    fn test_endpoint_rejects_opaque_base() {
        let base = Url::parse("mailto:ada@gmail.com").unwrap();
        assert!(endpoint(&base, &["Profile"]).is_none());
    }

    #[tokio::test]
    async fn test_list_all_returns_profiles() {
        let backend = MockBackend::start(vec![profile("ada@gmail.com", "Ada")]).await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        let profiles = store.list_all().await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].email, "ada@gmail.com");
    }

    #[tokio::test]
    async fn test_list_all_degrades_to_empty_on_server_error() {
        let backend = MockBackend::start_failing().await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        assert!(store.fetch_all().await.is_err());
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_degrades_to_empty_when_unreachable() {
        let store = HttpProfileStore::new(Url::parse("http://127.0.0.1:1/api").unwrap()).unwrap();
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_email_not_found_is_none() {
        let backend = MockBackend::start(vec![]).await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        assert!(store.get_by_email("new@gmail.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_separates_failure_from_absence() {
        let backend = MockBackend::start_failing().await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        let err = store.get_by_email("ada@gmail.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500 }));
        assert!(store.find_by_email("ada@gmail.com").await.is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let backend = MockBackend::start(vec![]).await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        let mut p = profile("grace@gmail.com", "Grace");
        p.skills = vec!["COBOL".into()];
        store.upsert(&p).await.unwrap();

        let fetched = store.get_by_email("grace@gmail.com").await.unwrap().unwrap();
        assert_eq!(fetched, p);
    }

    #[tokio::test]
    async fn test_upsert_propagates_failure() {
        let backend = MockBackend::start_failing().await;
        let store = HttpProfileStore::new(backend.api_url()).unwrap();
        let err = store
            .upsert(&profile("grace@gmail.com", "Grace"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500 }));
    }
}
