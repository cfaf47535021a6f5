use thiserror::Error;

/// Capture-session failures surfaced to the caller. Engine faults are
/// never retried by the session itself; the caller decides whether to
/// start again.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Recognition engine failed to start: {0}")]
    StartFailed(String),

    #[error("Session is already running")]
    AlreadyRunning,

    #[error("Session command channel closed")]
    ChannelClosed,
}
