use serde::{Deserialize, Deserializer, Serialize};

/// A directory entry for one person. `email` is the sole identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "nullable_years")]
    pub experience_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, with = "encoded_list")]
    pub skills: Vec<String>,
    #[serde(default, with = "encoded_list")]
    pub certifications: Vec<String>,
    #[serde(default, with = "encoded_list")]
    pub languages: Vec<String>,
    /// Data URL of the attached CV. Never inspected client-side.
    #[serde(default, rename = "cvBase64", skip_serializing_if = "Option::is_none")]
    pub cv_base64: Option<String>,
}

impl Profile {
    /// Upper-cased first character of the name, used as the avatar glyph.
    pub fn avatar_glyph(&self) -> Option<String> {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
    }
}

fn nullable_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// List fields travel as JSON-encoded text (`"[\"Go\",\"SQL\"]"`).
/// Decoding also accepts null, an empty string, or a bare array.
mod encoded_list {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(items: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = serde_json::to_string(items).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Vec::new()),
            Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
            Value::String(s) => serde_json::from_str(&s).map_err(D::Error::custom),
            v @ Value::Array(_) => serde_json::from_value(v).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an encoded string list, got {other}"
            ))),
        }
    }
}
