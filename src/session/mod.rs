//! Session module — the heart of the crate.
//!
//! One [`SessionOrchestrator`] drives one photo-to-practice learning flow:
//! it uploads the photo, tracks word selection, generates practice
//! sentences, and sequences recording plus pronunciation scoring, while
//! publishing an immutable [`SessionSnapshot`] after every transition.
//!
//! # Architecture
//!
//! ```text
//! SessionCommand (mpsc)           LearningService  AudioController
//!        │                              ▲                ▲
//!        ▼                              │                │
//! SessionOrchestrator::run() ───────────┴────────────────┘
//!        │
//!        ▼
//! SessionSnapshot (tokio::sync::watch) ──▶ presentation layer
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use piclearn::audio::AudioController;
//! use piclearn::config::AppConfig;
//! use piclearn::remote::ApiLearningService;
//! use piclearn::session::{SessionCommand, SessionOrchestrator, TopicTable};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let service = Arc::new(ApiLearningService::from_config(&config.service));
//!     # fn make_audio() -> Arc<dyn AudioController> { unimplemented!() }
//!     let audio = make_audio(); // platform audio device wrapper
//!
//!     let photo = std::fs::read("photo.jpg").unwrap();
//!     let topics = if config.topics.enabled {
//!         TopicTable::default()
//!     } else {
//!         TopicTable::disabled()
//!     };
//!
//!     let (orchestrator, mut snapshots) =
//!         SessionOrchestrator::new(photo, service, audio, topics);
//!     let (commands, command_rx) = tokio::sync::mpsc::channel(16);
//!     tokio::spawn(orchestrator.run(command_rx));
//!
//!     commands.send(SessionCommand::ToggleWord("bench".into())).await.unwrap();
//!     commands.send(SessionCommand::RequestSentence).await.unwrap();
//!
//!     snapshots.changed().await.unwrap();
//!     println!("phase: {:?}", snapshots.borrow().phase);
//! }
//! ```

pub mod model;
pub mod orchestrator;
pub mod state;
pub mod topics;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use model::{PracticeAttempt, PronunciationScore, VocabularyEntry, WordSelection};
pub use orchestrator::{SessionCommand, SessionOrchestrator};
pub use state::{snapshot_channel, SessionPhase, SessionSnapshot, SnapshotReceiver};
pub use topics::TopicTable;
