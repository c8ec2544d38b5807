//! Core `LearningService` trait and the `reqwest` implementation.
//!
//! `ApiLearningService` talks to the three learning endpoints.  All
//! connection details come from [`ServiceConfig`]; nothing is hardcoded.
//! Transport failures and malformed payloads surface identically — the
//! orchestrator only ever sees the per-stage error variant (recoverable by
//! a user retry), never a panic or a half-decoded value.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioClip;
use crate::config::ServiceConfig;
use crate::remote::wire::{SentenceResponse, SpeakingResponse, WordListResponse};
use crate::session::model::{PronunciationScore, VocabularyEntry};

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Per-stage failures of the learning service.
///
/// Each variant unifies transport errors and malformed responses into one
/// human-readable message; callers retry the stage, they never branch on
/// the cause.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The image upload or its vocabulary payload failed.
    #[error("image upload failed: {0}")]
    UploadFailed(String),

    /// Sentence generation failed or returned no candidates.
    #[error("sentence generation failed: {0}")]
    GenerationFailed(String),

    /// Pronunciation analysis failed or returned an unusable payload.
    #[error("pronunciation analysis failed: {0}")]
    AnalysisFailed(String),
}

// ---------------------------------------------------------------------------
// Service result types
// ---------------------------------------------------------------------------

/// What the service extracted from an uploaded photo.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAnalysis {
    /// Free-text description of the scene.
    pub context: String,
    /// Vocabulary entries found in the scene.
    pub vocabulary: Vec<VocabularyEntry>,
}

/// A single generated practice sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSentence {
    /// The sentence text.
    pub sentence: String,
    /// Vocabulary words the sentence exercises.
    pub used_vocabulary: Vec<String>,
}

// ---------------------------------------------------------------------------
// LearningService trait
// ---------------------------------------------------------------------------

/// Async interface to the remote learning service.
///
/// Implementors must be `Send + Sync` so they can be shared behind an
/// `Arc<dyn LearningService>`.  Single-shot semantics: no retry or backoff
/// is built in — retrying is the caller's policy.
#[async_trait]
pub trait LearningService: Send + Sync {
    /// Upload a photo and receive the scene context plus vocabulary.
    async fn upload_image(&self, image: &[u8]) -> Result<SceneAnalysis, RemoteError>;

    /// Generate one practice sentence from `words` within `context`.
    ///
    /// Resolves to the *first* candidate the service returns; an empty
    /// candidate list is [`RemoteError::GenerationFailed`], not a success.
    async fn generate_sentence(
        &self,
        words: &[String],
        context: &str,
    ) -> Result<GeneratedSentence, RemoteError>;

    /// Score a recorded clip against its practice sentence.
    async fn analyze_pronunciation(
        &self,
        clip: &AudioClip,
    ) -> Result<PronunciationScore, RemoteError>;
}

// Compile-time assertion: Box<dyn LearningService> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn LearningService>) {}
};

// ---------------------------------------------------------------------------
// ApiLearningService
// ---------------------------------------------------------------------------

/// Production [`LearningService`] backed by `reqwest`.
///
/// Endpoints (relative to `ServiceConfig::base_url`):
///
/// | Call                    | Route                       | Body            |
/// |-------------------------|-----------------------------|-----------------|
/// | `upload_image`          | `/api/v1/images/upload`     | multipart `file`|
/// | `generate_sentence`     | `/api/v1/sentences/generate`| JSON            |
/// | `analyze_pronunciation` | `/api/v1/audio/analyze`     | multipart `file`|
pub struct ApiLearningService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl ApiLearningService {
    /// Build a service client from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{route}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LearningService for ApiLearningService {
    async fn upload_image(&self, image: &[u8]) -> Result<SceneAnalysis, RemoteError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec())
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| RemoteError::UploadFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/v1/images/upload"))
            .multipart(form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RemoteError::UploadFailed(e.to_string()))?;

        let wire: WordListResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::UploadFailed(e.to_string()))?;

        Ok(SceneAnalysis {
            context: wire.context,
            vocabulary: wire.vocabulary,
        })
    }

    async fn generate_sentence(
        &self,
        words: &[String],
        context: &str,
    ) -> Result<GeneratedSentence, RemoteError> {
        // count is pinned to 1; the first candidate wins even if the
        // service ever returns more.
        let body = serde_json::json!({
            "words":   words,
            "context": context,
            "count":   1
        });

        let response = self
            .client
            .post(self.endpoint("/api/v1/sentences/generate"))
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RemoteError::GenerationFailed(e.to_string()))?;

        let wire: SentenceResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::GenerationFailed(e.to_string()))?;

        let first = wire
            .sentences
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::GenerationFailed("service returned no sentences".into()))?;

        Ok(GeneratedSentence {
            sentence: first.sentence,
            used_vocabulary: first.used_vocabulary,
        })
    }

    async fn analyze_pronunciation(
        &self,
        clip: &AudioClip,
    ) -> Result<PronunciationScore, RemoteError> {
        let part = reqwest::multipart::Part::bytes(clip.as_bytes().to_vec())
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|e| RemoteError::AnalysisFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("/api/v1/audio/analyze"))
            .multipart(form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RemoteError::AnalysisFailed(e.to_string()))?;

        let wire: SpeakingResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::AnalysisFailed(e.to_string()))?;

        let percent = wire.match_percentage.as_f32().ok_or_else(|| {
            RemoteError::AnalysisFailed("match_percentage is not a number".into())
        })?;

        Ok(PronunciationScore {
            percent,
            feedback: wire.feedback,
        })
    }
}

// ---------------------------------------------------------------------------
// MockLearningService  (test double)
// ---------------------------------------------------------------------------

/// Scripted [`LearningService`] for unit tests.
///
/// Each call returns a clone of its pre-configured result; call counters
/// let tests assert which stages actually ran.
#[cfg(test)]
pub struct MockLearningService {
    upload: Result<SceneAnalysis, RemoteError>,
    sentence: Result<GeneratedSentence, RemoteError>,
    analysis: Result<PronunciationScore, RemoteError>,
    upload_calls: std::sync::atomic::AtomicUsize,
    sentence_calls: std::sync::atomic::AtomicUsize,
    analysis_calls: std::sync::atomic::AtomicUsize,
    last_words: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockLearningService {
    pub fn new(
        upload: Result<SceneAnalysis, RemoteError>,
        sentence: Result<GeneratedSentence, RemoteError>,
        analysis: Result<PronunciationScore, RemoteError>,
    ) -> Self {
        Self {
            upload,
            sentence,
            analysis,
            upload_calls: std::sync::atomic::AtomicUsize::new(0),
            sentence_calls: std::sync::atomic::AtomicUsize::new(0),
            analysis_calls: std::sync::atomic::AtomicUsize::new(0),
            last_words: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn sentence_calls(&self) -> usize {
        self.sentence_calls
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls
            .load(std::sync::atomic::Ordering::SeqCst)
    }

    /// The word list passed to the most recent `generate_sentence` call.
    pub fn last_words(&self) -> Vec<String> {
        self.last_words.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl LearningService for MockLearningService {
    async fn upload_image(&self, _image: &[u8]) -> Result<SceneAnalysis, RemoteError> {
        self.upload_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.upload.clone()
    }

    async fn generate_sentence(
        &self,
        words: &[String],
        _context: &str,
    ) -> Result<GeneratedSentence, RemoteError> {
        self.sentence_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_words.lock().unwrap() = words.to_vec();
        self.sentence.clone()
    }

    async fn analyze_pronunciation(
        &self,
        _clip: &AudioClip,
    ) -> Result<PronunciationScore, RemoteError> {
        self.analysis_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.analysis.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> ServiceConfig {
        ServiceConfig {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _service = ApiLearningService::from_config(&make_config());
    }

    #[test]
    fn endpoint_joins_base_url_and_route() {
        let service = ApiLearningService::from_config(&make_config());
        assert_eq!(
            service.endpoint("/api/v1/images/upload"),
            "http://localhost:8000/api/v1/images/upload"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let mut config = make_config();
        config.base_url = "http://localhost:8000/".into();
        let service = ApiLearningService::from_config(&config);
        assert_eq!(
            service.endpoint("/api/v1/audio/analyze"),
            "http://localhost:8000/api/v1/audio/analyze"
        );
    }

    /// Verify `ApiLearningService` is usable as `dyn LearningService`.
    #[test]
    fn service_is_object_safe() {
        let service: Box<dyn LearningService> =
            Box::new(ApiLearningService::from_config(&make_config()));
        drop(service);
    }

    #[test]
    fn error_messages_name_their_stage() {
        assert!(RemoteError::UploadFailed("x".into())
            .to_string()
            .contains("upload"));
        assert!(RemoteError::GenerationFailed("x".into())
            .to_string()
            .contains("generation"));
        assert!(RemoteError::AnalysisFailed("x".into())
            .to_string()
            .contains("analysis"));
    }
}
