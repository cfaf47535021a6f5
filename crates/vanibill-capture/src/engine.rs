//! Recognition engine control interface.
//!
//! The engine is externally owned; it delivers [`EngineEvent`]s over an
//! mpsc channel held by the session. Only the session may start or stop an
//! engine, and no other component may hold a second concurrent engine
//! against the same audio input.

use async_trait::async_trait;
use vanibill_foundation::CaptureError;

/// Control primitives of the external recognition engine.
#[async_trait]
pub trait RecognitionEngine: Send {
    /// Begin streaming recognition with the given language hint. The engine
    /// confirms asynchronously via [`crate::EngineEvent::Started`].
    async fn start(&mut self, language: &str) -> Result<(), CaptureError>;

    /// Request a graceful stop; buffered audio may still produce events.
    async fn stop(&mut self);

    /// Hard-abort recognition if the engine supports it. Defaults to a
    /// no-op for engines without an abort primitive.
    async fn abort(&mut self) {}
}
