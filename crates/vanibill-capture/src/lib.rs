//! Speech-capture session management.
//!
//! Owns the lifecycle of an external recognition engine, a parallel audio
//! chunk stream used only for fallback transcription, and the timeout race
//! that triggers the fallback path when live recognition produces nothing
//! in time. Finalized transcript segments run synchronously through the
//! parser pipeline so downstream consumers observe actions in speech order.

pub mod engine;
pub mod fallback;
pub mod scripted;
pub mod session;
pub mod state;
pub mod types;

pub use engine::RecognitionEngine;
pub use fallback::{FallbackError, FallbackTranscriber, HttpFallbackTranscriber, NullFallback};
pub use scripted::ScriptedEngine;
pub use session::{CaptureSession, SessionHandle};
pub use state::{next_state, SessionInput, SessionState};
pub use types::{AudioChunk, CaptureConfig, EngineEvent, SessionMetrics, TranscriptSegment};
