use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single word of a legacy JSON transcript: `[timing, text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word(pub String, pub String);

impl Word {
    /// Timing token (milliseconds from the start of the media, as sent).
    pub fn timing(&self) -> &str {
        &self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Legacy transcript as returned by `/files/{id}/transcript.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub words: Vec<Word>,
    /// Word offsets at which a new paragraph starts.
    #[serde(default)]
    pub paragraphs: Vec<i64>,
    /// Speaker label -> display name.
    #[serde(default)]
    pub speakers: HashMap<String, String>,
}

impl Transcript {
    /// Plain text of the transcript, words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(Word::text)
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_transcript() {
        let transcript: Transcript = serde_json::from_str(
            r#"{"words":[["0","Good"],["320","evening."]],"paragraphs":[0],"speakers":{"0":"MACRON"}}"#,
        )
        .unwrap();
        assert_eq!(transcript.words.len(), 2);
        assert_eq!(transcript.words[1].timing(), "320");
        assert_eq!(transcript.text(), "Good evening.");
        assert_eq!(transcript.speakers["0"], "MACRON");
    }
}
