//! The audio capture/playback collaborator interface.
//!
//! [`AudioController`] is the narrow seam between the session core and the
//! platform audio device.  The core never touches the microphone or the
//! speaker directly — it pairs one [`start_capture`] with exactly one
//! [`stop_capture`], hands the resulting [`AudioClip`] to the learning
//! service, and fires playback/TTS without awaiting feedback.
//!
//! [`start_capture`]: AudioController::start_capture
//! [`stop_capture`]: AudioController::stop_capture

// ---------------------------------------------------------------------------
// CaptureHandle
// ---------------------------------------------------------------------------

/// Opaque token identifying one in-flight microphone capture.
///
/// Returned by [`AudioController::start_capture`] and consumed by
/// [`AudioController::stop_capture`]; the session holds at most one at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureHandle(u64);

impl CaptureHandle {
    /// Wrap a device-chosen capture id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id, for implementors that key captures by number.
    pub fn id(&self) -> u64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// AudioClip
// ---------------------------------------------------------------------------

/// A finished recording, as an opaque encoded byte buffer (WAV in practice).
///
/// The session core never decodes the audio; it only checks for emptiness
/// (a capture released before any sample landed) and forwards the bytes to
/// the pronunciation-analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
}

impl AudioClip {
    /// Wrap encoded audio bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// A clip with no audio data — what a zero-length capture yields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The encoded audio bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the capture produced no audio at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AudioController trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to the platform audio device.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn AudioController>` and called from the orchestrator task.
///
/// # Contract
///
/// - [`start_capture`](Self::start_capture) is idempotent: calling it while
///   a capture is already active returns the active handle instead of
///   starting a second one.  It never fails; a device problem surfaces later
///   as an empty clip.
/// - [`stop_capture`](Self::stop_capture) ends the capture for `handle` and
///   returns whatever audio was recorded (possibly empty).
/// - [`play`](Self::play) and [`speak`](Self::speak) are fire-and-forget;
///   they must not block the caller.
pub trait AudioController: Send + Sync {
    /// Begin recording from the microphone.
    fn start_capture(&self) -> CaptureHandle;

    /// End the capture identified by `handle` and return the recorded clip.
    fn stop_capture(&self, handle: CaptureHandle) -> AudioClip;

    /// Play back a recorded clip through the speaker.
    fn play(&self, clip: &AudioClip);

    /// Speak `text` via text-to-speech.
    fn speak(&self, text: &str);
}

// Compile-time assertion: Box<dyn AudioController> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioController>) {}
};

// ---------------------------------------------------------------------------
// MockAudioController  (test double)
// ---------------------------------------------------------------------------

/// Scripted [`AudioController`] for unit tests: every `stop_capture` yields
/// a pre-configured clip, and playback/TTS calls are recorded for assertion.
#[cfg(test)]
pub struct MockAudioController {
    clip_bytes: Vec<u8>,
    active: std::sync::Mutex<Option<u64>>,
    next_id: std::sync::atomic::AtomicU64,
    played: std::sync::atomic::AtomicUsize,
    spoken: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockAudioController {
    /// Every capture yields a clip holding `bytes`.
    pub fn recording(bytes: &[u8]) -> Self {
        Self {
            clip_bytes: bytes.to_vec(),
            active: std::sync::Mutex::new(None),
            next_id: std::sync::atomic::AtomicU64::new(1),
            played: std::sync::atomic::AtomicUsize::new(0),
            spoken: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every capture yields an empty clip (released too early).
    pub fn silent() -> Self {
        Self::recording(&[])
    }

    /// Number of `play` calls observed.
    pub fn play_count(&self) -> usize {
        self.played.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Texts passed to `speak`, in call order.
    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// `true` while a capture is active (started but not stopped).
    pub fn capture_active(&self) -> bool {
        self.active.lock().unwrap().is_some()
    }
}

#[cfg(test)]
impl AudioController for MockAudioController {
    fn start_capture(&self) -> CaptureHandle {
        let mut active = self.active.lock().unwrap();
        if let Some(id) = *active {
            return CaptureHandle::new(id);
        }
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *active = Some(id);
        CaptureHandle::new(id)
    }

    fn stop_capture(&self, handle: CaptureHandle) -> AudioClip {
        let mut active = self.active.lock().unwrap();
        if *active == Some(handle.id()) {
            *active = None;
        }
        AudioClip::new(self.clip_bytes.clone())
    }

    fn play(&self, _clip: &AudioClip) {
        self.played
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clip_reports_empty() {
        assert!(AudioClip::empty().is_empty());
        assert_eq!(AudioClip::empty().len(), 0);
    }

    #[test]
    fn clip_exposes_its_bytes() {
        let clip = AudioClip::new(vec![1, 2, 3]);
        assert!(!clip.is_empty());
        assert_eq!(clip.as_bytes(), &[1, 2, 3]);
        assert_eq!(clip.len(), 3);
    }

    #[test]
    fn mock_start_is_idempotent() {
        let mock = MockAudioController::recording(&[9]);
        let first = mock.start_capture();
        let second = mock.start_capture();
        assert_eq!(first, second);
        assert!(mock.capture_active());
    }

    #[test]
    fn mock_stop_clears_active_capture() {
        let mock = MockAudioController::recording(&[9]);
        let handle = mock.start_capture();
        let clip = mock.stop_capture(handle);
        assert_eq!(clip.as_bytes(), &[9]);
        assert!(!mock.capture_active());
    }

    #[test]
    fn controller_is_object_safe() {
        let controller: Box<dyn AudioController> = Box::new(MockAudioController::silent());
        drop(controller);
    }
}
