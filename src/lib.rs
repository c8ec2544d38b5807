//! PicLearn session core — snap a photo, learn the words, speak the sentences.
//!
//! This crate is the headless core of a photo-based language-learning app.
//! The embedding application supplies the camera, the screens, and the audio
//! device; the crate supplies the session state machine that sequences the
//! four asynchronous learning stages and keeps the observable state
//! consistent through partial failure.
//!
//! # Architecture
//!
//! ```text
//! SessionCommand (mpsc)
//!        │
//!        ▼
//! SessionOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ (on start)      LearningService::upload_image   → AwaitingSelection
//!        ├─ RequestSentence LearningService::generate_sentence → Practicing
//!        ├─ StartRecording  AudioController::start_capture  → AnalyzingAudio
//!        └─ FinishRecording AudioController::stop_capture
//!                           LearningService::analyze_pronunciation → Practicing
//!
//! SessionSnapshot (tokio::sync::watch) ──▶ read by the presentation layer
//! ```
//!
//! # Modules
//!
//! * [`session`] — session model, snapshot, topic table and the orchestrator.
//! * [`remote`]  — the learning-service collaborator trait, wire DTOs and the
//!   `reqwest`-backed implementation.
//! * [`audio`]   — the audio capture/playback collaborator trait.
//! * [`layout`]  — row packing for the wrapped vocabulary-chip display.
//! * [`config`]  — TOML-persisted application settings.

pub mod audio;
pub mod config;
pub mod layout;
pub mod remote;
pub mod session;
