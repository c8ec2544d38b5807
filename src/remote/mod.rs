//! Remote learning-service collaborator.
//!
//! This module provides:
//! * [`LearningService`] — async trait the orchestrator drives.
//! * [`ApiLearningService`] — `reqwest` implementation of the three
//!   endpoints (image upload, sentence generation, pronunciation analysis).
//! * [`RemoteError`] — one recoverable error variant per stage.
//! * [`wire`] — serde DTOs matching the JSON on the wire.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use piclearn::config::ServiceConfig;
//! use piclearn::remote::{ApiLearningService, LearningService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = ApiLearningService::from_config(&ServiceConfig::default());
//!
//!     let photo: Vec<u8> = std::fs::read("photo.jpg").unwrap();
//!     let analysis = service.upload_image(&photo).await.unwrap();
//!     println!("{}: {} words", analysis.context, analysis.vocabulary.len());
//! }
//! ```

pub mod client;
pub mod wire;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{
    ApiLearningService, GeneratedSentence, LearningService, RemoteError, SceneAnalysis,
};

// test-only re-export so the orchestrator test module can import the mock
// without `use piclearn::remote::client::MockLearningService`.
#[cfg(test)]
pub use client::MockLearningService;
