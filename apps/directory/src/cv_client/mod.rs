/// CV parser client — the only caller of the backend's `/CvParser` endpoints.
///
/// The extraction itself happens server-side; this module uploads pasted text
/// or a file and hands back whatever fields came back. One attempt per call,
/// no retry, no timeout beyond the transport default.
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::cv::{ParseTextRequest, ParserErrorBody};
use crate::models::ParsedCv;
use crate::store::endpoint;

/// File name sent alongside pasted text.
pub const PASTED_FILE_NAME: &str = "pasted_cv";

#[derive(Debug, Error)]
pub enum CvParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("API base URL '{0}' cannot carry path segments")]
    InvalidBaseUrl(String),
}

#[async_trait]
pub trait CvParser: Send + Sync {
    async fn parse_text(&self, text: &str) -> Result<ParsedCv, CvParseError>;

    async fn parse_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<ParsedCv, CvParseError>;
}

#[derive(Clone)]
pub struct HttpCvParser {
    client: Client,
    base: Url,
}

impl HttpCvParser {
    pub fn new(base: Url) -> Result<Self, CvParseError> {
        Ok(Self {
            client: Client::builder().build()?,
            base,
        })
    }

    fn url(&self, action: &str) -> Result<Url, CvParseError> {
        endpoint(&self.base, &["CvParser", action])
            .ok_or_else(|| CvParseError::InvalidBaseUrl(self.base.to_string()))
    }
}

#[async_trait]
impl CvParser for HttpCvParser {
    async fn parse_text(&self, text: &str) -> Result<ParsedCv, CvParseError> {
        let body = ParseTextRequest {
            cv_text: text,
            file_name: PASTED_FILE_NAME,
        };
        let response = self
            .client
            .post(self.url("parse-text")?)
            .json(&body)
            .send()
            .await?;
        read_parsed(response).await
    }

    async fn parse_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<ParsedCv, CvParseError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("parse-file")?)
            .multipart(form)
            .send()
            .await?;
        read_parsed(response).await
    }
}

/// Decodes a parser response, surfacing the `{ error }` body on failure.
async fn read_parsed(response: Response) -> Result<ParsedCv, CvParseError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("CV parser returned {}: {}", status, body);
        return Err(CvParseError::Api {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        });
    }
    let parsed: ParsedCv = response.json().await?;
    debug!(
        "CV parsed: name={}, skills={}",
        parsed.full_name.is_some(),
        parsed.skills.as_ref().map_or(0, Vec::len)
    );
    Ok(parsed)
}

fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ParserErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}
