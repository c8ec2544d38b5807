//! Wire-format DTOs for the learning-service endpoints.
//!
//! Field names mirror the JSON exactly (`used_vocabulary`,
//! `match_percentage`).  Decoding tolerance lives here — notably the
//! percentage field, which the service emits as a JSON number or a string
//! depending on version — so the client hands the orchestrator one clean
//! representation.

use serde::Deserialize;

use crate::session::model::VocabularyEntry;

// ---------------------------------------------------------------------------
// WordListResponse  (POST /api/v1/images/upload)
// ---------------------------------------------------------------------------

/// Response of the image-upload endpoint: the scene description and the
/// extracted vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct WordListResponse {
    pub context: String,
    pub vocabulary: Vec<VocabularyEntry>,
}

// ---------------------------------------------------------------------------
// SentenceResponse  (POST /api/v1/sentences/generate)
// ---------------------------------------------------------------------------

/// One generated sentence candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceCandidate {
    pub sentence: String,
    pub used_vocabulary: Vec<String>,
}

/// Response of the sentence-generation endpoint.  The request always pins
/// `count = 1`, but the field stays a list on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceResponse {
    pub sentences: Vec<SentenceCandidate>,
}

// ---------------------------------------------------------------------------
// SpeakingResponse  (POST /api/v1/audio/analyze)
// ---------------------------------------------------------------------------

/// Response of the pronunciation-analysis endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingResponse {
    pub match_percentage: Percentage,
    pub feedback: String,
}

/// A percentage the service encodes as either a JSON number or a string
/// (`82`, `82.5`, `"82"`, `"82%"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Percentage {
    Number(f64),
    Text(String),
}

impl Percentage {
    /// Normalise to `f32`, or `None` when the text form is not numeric.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Percentage::Number(n) => Some(*n as f32),
            Percentage::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_response_decodes() {
        let json = r#"{
            "context": "a park",
            "vocabulary": [
                {"word": "bench", "definition": "a long seat", "example": "I sat on the bench."}
            ]
        }"#;

        let decoded: WordListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.context, "a park");
        assert_eq!(decoded.vocabulary.len(), 1);
        assert_eq!(decoded.vocabulary[0].word, "bench");
    }

    #[test]
    fn sentence_response_decodes_snake_case_field() {
        let json = r#"{
            "sentences": [
                {"sentence": "I sat on the bench.", "used_vocabulary": ["bench"]}
            ]
        }"#;

        let decoded: SentenceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.sentences.len(), 1);
        assert_eq!(decoded.sentences[0].used_vocabulary, ["bench"]);
    }

    #[test]
    fn sentence_response_allows_empty_list() {
        let decoded: SentenceResponse = serde_json::from_str(r#"{"sentences": []}"#).unwrap();
        assert!(decoded.sentences.is_empty());
    }

    #[test]
    fn speaking_response_accepts_numeric_percentage() {
        let json = r#"{"match_percentage": 82, "feedback": "Good clarity"}"#;
        let decoded: SpeakingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.match_percentage.as_f32(), Some(82.0));
        assert_eq!(decoded.feedback, "Good clarity");
    }

    #[test]
    fn speaking_response_accepts_string_percentage() {
        let json = r#"{"match_percentage": "82", "feedback": "Good clarity"}"#;
        let decoded: SpeakingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.match_percentage.as_f32(), Some(82.0));
    }

    #[test]
    fn percentage_strips_percent_sign_and_whitespace() {
        let pct = Percentage::Text(" 73.5 % ".into());
        assert_eq!(pct.as_f32(), Some(73.5));
    }

    #[test]
    fn non_numeric_percentage_normalises_to_none() {
        let pct = Percentage::Text("excellent".into());
        assert_eq!(pct.as_f32(), None);
    }

    #[test]
    fn speaking_response_missing_feedback_fails_to_decode() {
        let json = r#"{"match_percentage": 82}"#;
        assert!(serde_json::from_str::<SpeakingResponse>(json).is_err());
    }

    #[test]
    fn fractional_percentage_survives() {
        let json = r#"{"match_percentage": 82.5, "feedback": "ok"}"#;
        let decoded: SpeakingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.match_percentage.as_f32(), Some(82.5));
    }
}
