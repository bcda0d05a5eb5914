use serde::{Deserialize, Serialize};

/// Body of `POST /CvParser/parse-text`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseTextRequest<'a> {
    pub cv_text: &'a str,
    pub file_name: &'a str,
}

/// Fields extracted by the remote parser. Every field is optional; a missing
/// field means "not detected", never "clear this value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCv {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

/// Error body returned by the parser on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ParserErrorBody {
    pub error: String,
}
