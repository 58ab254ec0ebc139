//! Legacy file records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A media file uploaded to 3Play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: u64,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub batch_id: Option<u64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub attribute1: Option<String>,
    #[serde(default)]
    pub attribute2: Option<String>,
    #[serde(default)]
    pub attribute3: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub word_count: Option<u64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub language_id: Option<i64>,
    #[serde(default)]
    pub default_service_type_id: Option<i64>,
    #[serde(default)]
    pub downloaded: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub turnaround_level_id: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub batch_name: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// One page of `GET /files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesPage {
    #[serde(default)]
    pub files: Vec<File>,
    pub summary: Summary,
}

/// Pagination summary. The service emits these either as numbers or as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub current_page: NumberOrString,
    #[serde(default)]
    pub per_page: NumberOrString,
    #[serde(default)]
    pub total_entries: NumberOrString,
    #[serde(default)]
    pub total_pages: NumberOrString,
}

/// Numeric value that tolerates both `10` and `"10"` on the wire.
///
/// Kept in its textual form, like the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NumberOrString(String);

impl NumberOrString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NumberOrString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NumberOrString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for NumberOrString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for NumberOrString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Input {
            Number(serde_json::Number),
            Text(String),
            Null(()),
        }

        match Input::deserialize(deserializer)? {
            Input::Number(n) => Ok(Self(n.to_string())),
            Input::Text(s) => Ok(Self(s)),
            Input::Null(()) => Ok(Self::default()),
        }
    }
}

impl Serialize for NumberOrString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Ok(n) = self.0.parse::<u64>() {
            serializer.serialize_u64(n)
        } else if let Ok(n) = self.0.parse::<i64>() {
            serializer.serialize_i64(n)
        } else {
            serializer.serialize_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_accepts_numbers_and_strings() {
        let summary: Summary = serde_json::from_str(
            r#"{"current_page":"1","per_page":10,"total_entries":"25","total_pages":3}"#,
        )
        .unwrap();
        assert_eq!(summary.current_page, "1");
        assert_eq!(summary.per_page, "10");
        assert_eq!(summary.total_entries.as_u64(), Some(25));
        assert_eq!(summary.total_pages.to_string(), "3");
    }

    #[test]
    fn test_summary_null_values_are_empty() {
        let summary: Summary =
            serde_json::from_str(r#"{"current_page":null,"per_page":"5"}"#).unwrap();
        assert_eq!(summary.current_page.as_str(), "");
        assert_eq!(summary.current_page.as_u64(), None);
        assert_eq!(summary.per_page.as_u64(), Some(5));
    }

    #[test]
    fn test_number_or_string_serializes_numbers_as_numbers() {
        let summary = Summary {
            current_page: "2".into(),
            per_page: "ten".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["per_page"], "ten");
    }

    #[test]
    fn test_file_tolerates_nulls() {
        let file: File = serde_json::from_str(
            r#"{"id":1,"name":"clip.mp4","video_id":null,"attribute1":null,"downloaded":true}"#,
        )
        .unwrap();
        assert_eq!(file.id, 1);
        assert_eq!(file.video_id, None);
        assert_eq!(file.downloaded, Some(true));
    }
}
