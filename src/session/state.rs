//! Session phases and the observable snapshot.
//!
//! [`SessionPhase`] drives the orchestrator's state machine.  The
//! presentation layer never shares mutable state with the orchestrator:
//! every transition builds a fresh [`SessionSnapshot`] and publishes it over
//! a `tokio::sync::watch` channel, so readers always see a complete,
//! consistent value and can await changes at their own cadence.

use tokio::sync::watch;

use crate::session::model::{PracticeAttempt, VocabularyEntry, WordSelection};

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Phases of the photo-to-practice learning flow.
///
/// The state machine transitions are:
///
/// ```text
/// Uploading ──upload resolves──▶ AwaitingSelection
/// AwaitingSelection ⇄ GeneratingSentence ──▶ Practicing
/// Practicing ⇄ AnalyzingAudio
/// ```
///
/// `AwaitingSelection` and `Practicing` are the stable interactive phases;
/// the other three are transient while a stage operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The photo is being uploaded for vocabulary extraction.
    Uploading,

    /// Vocabulary has arrived (or the upload failed); the user is picking
    /// words for the next sentence.
    AwaitingSelection,

    /// A sentence-generation request is in flight.
    GeneratingSentence,

    /// At least one sentence has been generated; the user can practice,
    /// record, and revisit attempts.
    Practicing,

    /// A microphone capture is active, or its pronunciation analysis is in
    /// flight.
    AnalyzingAudio,
}

impl SessionPhase {
    /// `true` while a stage operation (or capture) is in flight.
    ///
    /// The presentation layer uses this to disable the interactive controls,
    /// and the orchestrator uses it to ignore commands that would start a
    /// second operation.
    ///
    /// ```
    /// use piclearn::session::SessionPhase;
    ///
    /// assert!(SessionPhase::Uploading.is_busy());
    /// assert!(!SessionPhase::AwaitingSelection.is_busy());
    /// assert!(SessionPhase::GeneratingSentence.is_busy());
    /// assert!(!SessionPhase::Practicing.is_busy());
    /// assert!(SessionPhase::AnalyzingAudio.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionPhase::Uploading
                | SessionPhase::GeneratingSentence
                | SessionPhase::AnalyzingAudio
        )
    }

    /// Short human-readable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Uploading => "Analyzing photo",
            SessionPhase::AwaitingSelection => "Pick words",
            SessionPhase::GeneratingSentence => "Making a sentence",
            SessionPhase::Practicing => "Practice",
            SessionPhase::AnalyzingAudio => "Listening",
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Uploading
    }
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// Immutable observable state of one learning session.
///
/// Replaced wholesale on every transition — the orchestrator never mutates a
/// published snapshot.  The photo bytes are deliberately absent: they are
/// write-once input the presentation layer already has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    /// Current phase of the learning flow.
    pub phase: SessionPhase,

    /// Free-text description of the scene.  Seeded by the upload response,
    /// then editable by the user.
    pub context: String,

    /// Vocabulary extracted from the photo; empty until the upload resolves
    /// (and empty forever if it failed).
    pub vocabulary: Vec<VocabularyEntry>,

    /// Per-word selection state — a total map over `vocabulary`'s words.
    pub selection: WordSelection,

    /// Append-only log of generated sentences and their eventual scores.
    pub practice_log: Vec<PracticeAttempt>,

    /// Sentence targeted by the active microphone capture, when one is held.
    pub recording_target: Option<String>,

    /// Last stage failure, cleared by the next successful operation.
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    /// The initial snapshot of a fresh session: phase `Uploading`, nothing
    /// populated yet.
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Snapshot channel
// ---------------------------------------------------------------------------

/// Receiving half of the snapshot broadcast.
///
/// Cheap to clone; `borrow()` reads the latest snapshot, `changed().await`
/// waits for the next transition.
pub type SnapshotReceiver = watch::Receiver<SessionSnapshot>;

/// Create the snapshot broadcast pair seeded with the initial snapshot.
pub fn snapshot_channel() -> (watch::Sender<SessionSnapshot>, SnapshotReceiver) {
    watch::channel(SessionSnapshot::new())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SessionPhase::is_busy ---

    #[test]
    fn stable_phases_are_not_busy() {
        assert!(!SessionPhase::AwaitingSelection.is_busy());
        assert!(!SessionPhase::Practicing.is_busy());
    }

    #[test]
    fn transient_phases_are_busy() {
        assert!(SessionPhase::Uploading.is_busy());
        assert!(SessionPhase::GeneratingSentence.is_busy());
        assert!(SessionPhase::AnalyzingAudio.is_busy());
    }

    #[test]
    fn default_phase_is_uploading() {
        assert_eq!(SessionPhase::default(), SessionPhase::Uploading);
    }

    #[test]
    fn every_phase_has_a_label() {
        for phase in [
            SessionPhase::Uploading,
            SessionPhase::AwaitingSelection,
            SessionPhase::GeneratingSentence,
            SessionPhase::Practicing,
            SessionPhase::AnalyzingAudio,
        ] {
            assert!(!phase.label().is_empty());
        }
    }

    // ---- SessionSnapshot ---

    #[test]
    fn fresh_snapshot_is_empty_and_uploading() {
        let snapshot = SessionSnapshot::new();
        assert_eq!(snapshot.phase, SessionPhase::Uploading);
        assert!(snapshot.context.is_empty());
        assert!(snapshot.vocabulary.is_empty());
        assert!(snapshot.selection.is_empty());
        assert!(snapshot.practice_log.is_empty());
        assert!(snapshot.recording_target.is_none());
        assert!(snapshot.last_error.is_none());
    }

    #[test]
    fn channel_publishes_replacement_snapshots() {
        let (tx, rx) = snapshot_channel();

        let mut next = rx.borrow().clone();
        next.phase = SessionPhase::AwaitingSelection;
        next.context = "a park".into();
        tx.send_replace(next);

        let seen = rx.borrow();
        assert_eq!(seen.phase, SessionPhase::AwaitingSelection);
        assert_eq!(seen.context, "a park");
    }

    #[test]
    fn snapshot_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionSnapshot>();
        assert_send_sync::<SnapshotReceiver>();
    }
}
