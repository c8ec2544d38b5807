//! Audio collaborator module — capture handles, clips, playback and TTS.
//!
//! The session core treats the audio device as an external capability behind
//! the [`AudioController`] trait.  Hold-to-record interactions map onto the
//! trait like this:
//!
//! ```text
//! press   ──▶ start_capture()            → CaptureHandle
//! release ──▶ stop_capture(handle)       → AudioClip (may be empty)
//!              └─ non-empty clip ──▶ LearningService::analyze_pronunciation
//! "Play"  ──▶ play(&clip)                (fire-and-forget)
//! listen  ──▶ speak("I sat on the bench.")  (fire-and-forget TTS)
//! ```
//!
//! Wiring a real device (cpal, AVFoundation, …) is the embedding app's job;
//! the crate ships only the contract plus a scripted mock for tests.

pub mod controller;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{AudioClip, AudioController, CaptureHandle};

// test-only re-export so the orchestrator test module can import the mock
// without `use piclearn::audio::controller::MockAudioController`.
#[cfg(test)]
pub use controller::MockAudioController;
