//! Core types for the capture session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Raw audio buffer from the low-level recorder, kept only for fallback.
pub type AudioChunk = Vec<u8>;

static SEGMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a monotonic segment id.
pub fn next_segment_id() -> u64 {
    SEGMENT_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// One finalized unit of recognized speech text. Immutable once created.
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    pub id: u64,
    pub text: String,
    pub captured_at: Instant,
}

/// Events reported by the external recognition engine.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The engine confirmed it is listening.
    Started,
    /// A recognition result; `is_final: false` means interim text that may
    /// still change.
    Result { text: String, is_final: bool },
    /// Engine-level failure. The session never retries on its own.
    Error { message: String },
    /// The engine stopped delivering results.
    Ended,
}

/// Capture session configuration.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Language hint handed to the recognition engine.
    pub language: String,
    /// How long to wait for a finalized transcript before the buffered
    /// audio is sent to the fallback transcription service.
    pub fallback_timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            language: "hi-IN".to_string(),
            fallback_timeout: Duration::from_secs(5),
        }
    }
}

/// Session counters, shared with the handle for observability and tests.
#[derive(Debug, Clone, Default)]
pub struct SessionMetrics {
    /// Finalized segments accepted (live or via fallback).
    pub segments_final: u64,
    /// Interim result updates.
    pub partial_updates: u64,
    /// Recognition results dropped by the pause gate.
    pub dropped_while_paused: u64,
    /// Engine error events observed.
    pub engine_errors: u64,
    /// Fallback upload attempts made.
    pub fallback_uploads: u64,
    /// Fallback attempts that failed (network/service).
    pub fallback_failures: u64,
}
