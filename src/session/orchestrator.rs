//! Session orchestrator — drives the photo → vocabulary → sentence →
//! pronunciation workflow.
//!
//! [`SessionOrchestrator`] owns the session and responds to
//! [`SessionCommand`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Session flow
//!
//! ```text
//! run()
//!   └─▶ upload_image(photo)                         [Uploading]
//!         ├─ Ok  → vocabulary + context populated   [AwaitingSelection]
//!         └─ Err → empty vocabulary, last_error set [AwaitingSelection]
//!
//! SessionCommand::RequestSentence
//!   └─▶ selected words (sorted) + topic enrichment
//!         → generate_sentence                       [GeneratingSentence]
//!         ├─ Ok  → append unscored attempt          [Practicing]
//!         └─ Err → last_error set, log unchanged    [AwaitingSelection]
//!
//! SessionCommand::StartRecording { sentence }
//!   └─▶ start_capture                               [AnalyzingAudio]
//! SessionCommand::FinishRecording
//!   └─▶ stop_capture
//!         ├─ empty clip → no analysis               [Practicing]
//!         └─ analyze_pronunciation
//!               ├─ Ok  → score written in place     [Practicing]
//!               └─ Err → last_error set             [Practicing]
//! ```
//!
//! Commands are processed strictly one at a time, so no two stage
//! operations are ever in flight together; a trigger that arrives while a
//! stage runs simply queues behind it.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::audio::{AudioClip, AudioController, CaptureHandle};
use crate::remote::LearningService;
use crate::session::model::PracticeAttempt;
use crate::session::state::{snapshot_channel, SessionPhase, SessionSnapshot, SnapshotReceiver};
use crate::session::topics::TopicTable;

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// User-triggered events the orchestrator responds to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Replace the editable scene-context text.
    SetContext(String),

    /// Flip whether a vocabulary word joins the next sentence.  Pure local
    /// state, no network.
    ToggleWord(String),

    /// Generate a sentence from the currently selected words.
    RequestSentence,

    /// Re-select every word a past attempt exercised (tap on the attempt).
    RevisitAttempt(usize),

    /// Begin recording the user speaking `sentence` (press-and-hold).
    StartRecording { sentence: String },

    /// End the recording and have it scored (release).
    FinishRecording,

    /// Abandon the recording without analysis.
    CancelRecording,

    /// Replay the most recent recording.
    PlayRecording,

    /// Speak a sentence aloud via text-to-speech.
    SpeakSentence(String),
}

// ---------------------------------------------------------------------------
// ActiveCapture
// ---------------------------------------------------------------------------

/// The one in-flight microphone capture: its device handle and the sentence
/// the eventual analysis result belongs to.
struct ActiveCapture {
    handle: CaptureHandle,
    sentence: String,
}

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Drives one complete photo-to-practice learning session.
///
/// Create with [`SessionOrchestrator::new`] — which also hands back the
/// [`SnapshotReceiver`] the presentation layer observes — then call
/// [`run`](Self::run) inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use piclearn::session::{SessionCommand, SessionOrchestrator, TopicTable};
///
/// # async fn example() {
/// # use piclearn::audio::AudioController;
/// # use piclearn::remote::LearningService;
/// # fn make_service() -> Arc<dyn LearningService> { unimplemented!() }
/// # fn make_audio() -> Arc<dyn AudioController> { unimplemented!() }
/// let photo: Vec<u8> = std::fs::read("photo.jpg").unwrap();
/// let (orchestrator, snapshots) =
///     SessionOrchestrator::new(photo, make_service(), make_audio(), TopicTable::default());
///
/// let (commands, command_rx) = tokio::sync::mpsc::channel(16);
/// tokio::spawn(orchestrator.run(command_rx));
///
/// commands.send(SessionCommand::ToggleWord("bench".into())).await.unwrap();
/// commands.send(SessionCommand::RequestSentence).await.unwrap();
/// # let _ = snapshots;
/// # }
/// ```
pub struct SessionOrchestrator {
    photo: Vec<u8>,
    service: Arc<dyn LearningService>,
    audio: Arc<dyn AudioController>,
    topics: TopicTable,
    state: watch::Sender<SessionSnapshot>,
    active_capture: Option<ActiveCapture>,
    last_clip: Option<AudioClip>,
}

impl SessionOrchestrator {
    /// Create a session around `photo` and return the orchestrator together
    /// with the snapshot receiver for the presentation layer.
    ///
    /// # Arguments
    ///
    /// * `photo`   — the captured image bytes; immutable for the session.
    /// * `service` — remote learning service (e.g. [`ApiLearningService`]).
    /// * `audio`   — platform audio device wrapper.
    /// * `topics`  — bonus-topic table ([`TopicTable::disabled`] to opt out).
    ///
    /// [`ApiLearningService`]: crate::remote::ApiLearningService
    pub fn new(
        photo: Vec<u8>,
        service: Arc<dyn LearningService>,
        audio: Arc<dyn AudioController>,
        topics: TopicTable,
    ) -> (Self, SnapshotReceiver) {
        let (state, snapshots) = snapshot_channel();
        let orchestrator = Self {
            photo,
            service,
            audio,
            topics,
            state,
            active_capture: None,
            last_clip: None,
        };
        (orchestrator, snapshots)
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Upload the photo, then process commands until `commands` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task.  It
    /// returns once every command sender has been dropped (the user left
    /// the detail flow).
    pub async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        self.upload_photo().await;

        while let Some(command) = commands.recv().await {
            match command {
                SessionCommand::SetContext(text) => self.handle_set_context(text),
                SessionCommand::ToggleWord(word) => self.handle_toggle_word(&word),
                SessionCommand::RequestSentence => self.handle_request_sentence().await,
                SessionCommand::RevisitAttempt(index) => self.handle_revisit_attempt(index),
                SessionCommand::StartRecording { sentence } => {
                    self.handle_start_recording(sentence)
                }
                SessionCommand::FinishRecording => self.handle_finish_recording().await,
                SessionCommand::CancelRecording => self.handle_cancel_recording(),
                SessionCommand::PlayRecording => self.handle_play_recording(),
                SessionCommand::SpeakSentence(text) => self.handle_speak_sentence(&text),
            }
        }

        log::info!("session: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Upload stage
    // -----------------------------------------------------------------------

    /// Upload the session photo and populate vocabulary + context.
    ///
    /// Failure is recoverable into an empty session: the user still lands in
    /// `AwaitingSelection` (with `last_error` set) instead of being stuck in
    /// `Uploading`.
    async fn upload_photo(&mut self) {
        log::debug!("session: uploading photo ({} bytes)", self.photo.len());

        match self.service.upload_image(&self.photo).await {
            Ok(analysis) => {
                log::debug!(
                    "session: photo analysed, {} vocabulary entries",
                    analysis.vocabulary.len()
                );
                self.update(|s| {
                    s.context = analysis.context;
                    s.selection =
                        crate::session::model::WordSelection::from_vocabulary(&analysis.vocabulary);
                    s.vocabulary = analysis.vocabulary;
                    s.phase = SessionPhase::AwaitingSelection;
                    s.last_error = None;
                });
            }
            Err(e) => {
                log::warn!("session: photo upload failed: {e}");
                self.update(|s| {
                    s.phase = SessionPhase::AwaitingSelection;
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Selection & context
    // -----------------------------------------------------------------------

    fn handle_set_context(&mut self, text: String) {
        if self.phase().is_busy() {
            log::debug!("session: ignoring SetContext while busy");
            return;
        }
        self.update(|s| s.context = text);
    }

    fn handle_toggle_word(&mut self, word: &str) {
        if self.phase().is_busy() {
            log::debug!("session: ignoring ToggleWord while busy");
            return;
        }
        self.update(|s| {
            if !s.selection.toggle(word) {
                log::debug!("session: toggled word {word:?} is not in the vocabulary");
            }
        });
    }

    fn handle_revisit_attempt(&mut self, index: usize) {
        if self.phase().is_busy() {
            log::debug!("session: ignoring RevisitAttempt while busy");
            return;
        }

        let used = match self.state.borrow().practice_log.get(index) {
            Some(attempt) => attempt.used_vocabulary.clone(),
            None => {
                log::debug!("session: RevisitAttempt index {index} out of range");
                return;
            }
        };

        self.update(|s| {
            for word in &used {
                s.selection.select(word);
            }
        });
    }

    // -----------------------------------------------------------------------
    // Sentence generation stage
    // -----------------------------------------------------------------------

    /// Snapshot the sorted selection, enrich it with bonus topics, and ask
    /// the service for one sentence.
    async fn handle_request_sentence(&mut self) {
        if self.phase().is_busy() {
            log::debug!("session: ignoring RequestSentence while busy");
            return;
        }

        let (mut words, context) = {
            let snapshot = self.state.borrow();
            (snapshot.selection.selected_words(), snapshot.context.clone())
        };
        self.topics.enrich(&mut words);

        log::debug!("session: requesting sentence for {words:?}");
        self.update(|s| s.phase = SessionPhase::GeneratingSentence);

        match self.service.generate_sentence(&words, &context).await {
            Ok(generated) => {
                log::debug!("session: sentence generated: {:?}", generated.sentence);
                self.update(|s| {
                    s.practice_log.push(PracticeAttempt::unscored(
                        generated.sentence,
                        generated.used_vocabulary,
                    ));
                    s.phase = SessionPhase::Practicing;
                    s.last_error = None;
                });
            }
            Err(e) => {
                log::warn!("session: sentence generation failed: {e}");
                self.update(|s| {
                    s.phase = SessionPhase::AwaitingSelection;
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Recording & analysis stage
    // -----------------------------------------------------------------------

    fn handle_start_recording(&mut self, sentence: String) {
        if self.phase() != SessionPhase::Practicing {
            log::debug!("session: ignoring StartRecording outside Practicing");
            return;
        }
        if self.active_capture.is_some() {
            log::debug!("session: ignoring StartRecording while a capture is active");
            return;
        }

        let handle = self.audio.start_capture();
        log::debug!("session: capture started for {sentence:?}");
        self.active_capture = Some(ActiveCapture {
            handle,
            sentence: sentence.clone(),
        });
        self.update(|s| {
            s.phase = SessionPhase::AnalyzingAudio;
            s.recording_target = Some(sentence);
        });
    }

    /// Stop the capture and, unless it came back empty, send it for scoring.
    ///
    /// The scored result is written into the attempt whose sentence text
    /// matches the capture target exactly, preserving its position in the
    /// log.  A result with no matching attempt is discarded.
    async fn handle_finish_recording(&mut self) {
        let Some(active) = self.active_capture.take() else {
            log::debug!("session: ignoring FinishRecording with no active capture");
            return;
        };

        let clip = self.audio.stop_capture(active.handle);

        if clip.is_empty() {
            log::debug!("session: capture was empty, skipping analysis");
            self.update(|s| {
                s.phase = SessionPhase::Practicing;
                s.recording_target = None;
            });
            return;
        }

        self.update(|s| s.recording_target = None);
        self.last_clip = Some(clip.clone());

        match self.service.analyze_pronunciation(&clip).await {
            Ok(score) => {
                log::debug!(
                    "session: pronunciation scored {:.0}% for {:?}",
                    score.percent,
                    active.sentence
                );
                self.update(|s| {
                    match s
                        .practice_log
                        .iter_mut()
                        .find(|attempt| attempt.sentence == active.sentence)
                    {
                        Some(attempt) => attempt.score = Some(score),
                        None => log::warn!(
                            "session: no attempt matches {:?}, discarding analysis result",
                            active.sentence
                        ),
                    }
                    s.phase = SessionPhase::Practicing;
                    s.last_error = None;
                });
            }
            Err(e) => {
                log::warn!("session: pronunciation analysis failed: {e}");
                self.update(|s| {
                    s.phase = SessionPhase::Practicing;
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    fn handle_cancel_recording(&mut self) {
        let Some(active) = self.active_capture.take() else {
            log::debug!("session: ignoring CancelRecording with no active capture");
            return;
        };

        let _ = self.audio.stop_capture(active.handle);
        log::debug!("session: capture cancelled");
        self.update(|s| {
            s.phase = SessionPhase::Practicing;
            s.recording_target = None;
        });
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    fn handle_play_recording(&self) {
        match &self.last_clip {
            Some(clip) => self.audio.play(clip),
            None => log::debug!("session: no recording to play yet"),
        }
    }

    fn handle_speak_sentence(&self, text: &str) {
        self.audio.speak(text);
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    /// Publish a new snapshot built from the current one.
    fn update(&self, apply: impl FnOnce(&mut SessionSnapshot)) {
        let mut next = self.state.borrow().clone();
        apply(&mut next);
        self.state.send_replace(next);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
