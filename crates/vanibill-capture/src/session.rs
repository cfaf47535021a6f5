//! The capture session: one tokio task owning the recognition engine, the
//! fallback chunk buffer and the timeout race. Control state lives on the
//! shared handle so `stop()` gates new events immediately even while the
//! engine's own shutdown is still in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::time::Instant as TokioInstant;
use tracing::{debug, error, info, warn};

use vanibill_foundation::{real_clock, CaptureError, SharedClock};
use vanibill_parser::{normalize_action, parse_segment, NormalizedAction};

use crate::engine::RecognitionEngine;
use crate::fallback::FallbackTranscriber;
use crate::state::{next_state, SessionInput, SessionState};
use crate::types::{
    next_segment_id, AudioChunk, CaptureConfig, EngineEvent, SessionMetrics, TranscriptSegment,
};

/// Buffered audio awaiting the fallback race. At most one exists per
/// session, and at most one fallback timer is outstanding.
#[derive(Debug)]
struct PendingFallback {
    chunks: Vec<AudioChunk>,
    armed_at: Instant,
}

enum SessionCommand {
    Start,
    Stop,
}

/// Control flags shared between the handle and the session task. The flags
/// govern behavior independent of the observed state: `should_run` is true
/// from `start()` until `stop()`; `paused` is set only by `stop()`.
struct SessionControl {
    state: Mutex<SessionState>,
    should_run: AtomicBool,
    paused: AtomicBool,
}

impl SessionControl {
    fn set_state(&self, input: SessionInput) -> SessionState {
        let paused = self.paused.load(Ordering::SeqCst);
        let mut state = self.state.lock();
        let from = *state;
        let to = next_state(from, input, paused);
        if from != to {
            info!(target: "capture", "session state: {:?} -> {:?}", from, to);
        }
        *state = to;
        to
    }
}

/// Caller-facing handle. `stop()` is idempotent and takes effect for new
/// events immediately; restart is always an explicit caller decision.
#[derive(Clone)]
pub struct SessionHandle {
    control: Arc<SessionControl>,
    cmd_tx: mpsc::Sender<SessionCommand>,
    metrics: Arc<RwLock<SessionMetrics>>,
}

impl SessionHandle {
    pub fn state(&self) -> SessionState {
        *self.control.state.lock()
    }

    pub fn metrics(&self) -> SessionMetrics {
        self.metrics.read().clone()
    }

    /// Starts (or resumes) capture: clears the pause flag, moves the state
    /// to `Connecting` and asks the task to start the engine.
    pub async fn start(&self) -> Result<(), CaptureError> {
        {
            let state = self.control.state.lock();
            if self.control.should_run.load(Ordering::SeqCst)
                && matches!(*state, SessionState::Connecting | SessionState::Open)
            {
                return Err(CaptureError::AlreadyRunning);
            }
        }

        self.control.paused.store(false, Ordering::SeqCst);
        self.control.should_run.store(true, Ordering::SeqCst);
        self.control.set_state(SessionInput::StartRequested);

        self.cmd_tx
            .send(SessionCommand::Start)
            .await
            .map_err(|_| CaptureError::ChannelClosed)
    }

    /// Pauses capture. The state moves to `Paused` optimistically, before
    /// the engine confirms; the underlying audio input stream stays alive
    /// so a later `start()` resumes without renegotiating the device.
    pub async fn stop(&self) -> Result<(), CaptureError> {
        self.control.paused.store(true, Ordering::SeqCst);
        self.control.should_run.store(false, Ordering::SeqCst);
        self.control.set_state(SessionInput::StopRequested);

        self.cmd_tx
            .send(SessionCommand::Stop)
            .await
            .map_err(|_| CaptureError::ChannelClosed)
    }
}

/// The session task. Consumes engine events, recorder chunks and handle
/// commands on one loop, preserving speech order end to end.
pub struct CaptureSession<E, F> {
    control: Arc<SessionControl>,
    engine: E,
    engine_rx: mpsc::Receiver<EngineEvent>,
    chunk_rx: mpsc::Receiver<AudioChunk>,
    fallback: F,
    action_tx: mpsc::Sender<NormalizedAction>,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    config: CaptureConfig,
    clock: SharedClock,
    metrics: Arc<RwLock<SessionMetrics>>,

    last_partial: Option<String>,
    pending: Option<PendingFallback>,
    fallback_deadline: Option<TokioInstant>,
    saw_final: bool,
}

impl<E, F> CaptureSession<E, F>
where
    E: RecognitionEngine,
    F: FallbackTranscriber,
{
    pub fn new(
        engine: E,
        engine_rx: mpsc::Receiver<EngineEvent>,
        chunk_rx: mpsc::Receiver<AudioChunk>,
        fallback: F,
        action_tx: mpsc::Sender<NormalizedAction>,
        config: CaptureConfig,
    ) -> (Self, SessionHandle) {
        Self::with_clock(engine, engine_rx, chunk_rx, fallback, action_tx, config, real_clock())
    }

    pub fn with_clock(
        engine: E,
        engine_rx: mpsc::Receiver<EngineEvent>,
        chunk_rx: mpsc::Receiver<AudioChunk>,
        fallback: F,
        action_tx: mpsc::Sender<NormalizedAction>,
        config: CaptureConfig,
        clock: SharedClock,
    ) -> (Self, SessionHandle) {
        let control = Arc::new(SessionControl {
            state: Mutex::new(SessionState::Closed),
            should_run: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        });
        let metrics = Arc::new(RwLock::new(SessionMetrics::default()));
        let (cmd_tx, cmd_rx) = mpsc::channel(16);

        let handle = SessionHandle {
            control: Arc::clone(&control),
            cmd_tx,
            metrics: Arc::clone(&metrics),
        };

        let session = Self {
            control,
            engine,
            engine_rx,
            chunk_rx,
            fallback,
            action_tx,
            cmd_rx,
            config,
            clock,
            metrics,
            last_partial: None,
            pending: None,
            fallback_deadline: None,
            saw_final: false,
        };

        (session, handle)
    }

    /// Runs until the handle (command channel) is dropped.
    pub async fn run(mut self) {
        info!(target: "capture", "capture session task started");

        loop {
            // A dummy far-future deadline keeps the branch type simple; the
            // `if` guard disables it unless a timer is actually armed.
            let deadline = self
                .fallback_deadline
                .unwrap_or_else(|| TokioInstant::now() + std::time::Duration::from_secs(86_400));

            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(SessionCommand::Start) => self.handle_start().await,
                    Some(SessionCommand::Stop) => self.handle_stop().await,
                    None => break,
                },
                Some(event) = self.engine_rx.recv() => {
                    self.handle_engine_event(event).await;
                }
                Some(chunk) = self.chunk_rx.recv() => {
                    self.handle_chunk(chunk);
                }
                _ = tokio::time::sleep_until(deadline), if self.fallback_deadline.is_some() => {
                    self.handle_fallback_fire().await;
                }
            }
        }

        let metrics = self.metrics.read();
        info!(
            target: "capture",
            "capture session exiting - finals: {}, partials: {}, dropped-paused: {}, fallback uploads: {} (failed: {})",
            metrics.segments_final,
            metrics.partial_updates,
            metrics.dropped_while_paused,
            metrics.fallback_uploads,
            metrics.fallback_failures,
        );
    }

    async fn handle_start(&mut self) {
        self.saw_final = false;
        self.last_partial = None;
        self.pending = None;
        self.fallback_deadline = None;

        if let Err(e) = self.engine.start(&self.config.language).await {
            error!(target: "capture", "recognition engine failed to start: {}", e);
            self.control.set_state(SessionInput::EngineError);
        }
    }

    async fn handle_stop(&mut self) {
        // State already moved to Paused by the handle. The audio input
        // stream itself is deliberately left alive for cheap resume.
        self.engine.stop().await;
        self.engine.abort().await;
        self.last_partial = None;
        self.pending = None;
        self.fallback_deadline = None;
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        let paused = self.control.paused.load(Ordering::SeqCst);

        match event {
            EngineEvent::Started => {
                if paused {
                    debug!(target: "capture", "stale engine-started event while paused; ignoring");
                } else {
                    self.control.set_state(SessionInput::EngineStarted);
                }
            }
            EngineEvent::Result { text, is_final } => {
                // Stale-event guard: results arriving after stop() are
                // ignored entirely, even before the engine's own end event.
                if paused {
                    self.metrics.write().dropped_while_paused += 1;
                    debug!(target: "capture", "recognition result ignored while paused");
                    return;
                }
                if is_final {
                    self.accept_final(text).await;
                } else {
                    self.metrics.write().partial_updates += 1;
                    self.last_partial = Some(text);
                }
            }
            EngineEvent::Error { message } => {
                self.metrics.write().engine_errors += 1;
                warn!(target: "capture", "recognition engine error: {}", message);
                self.control.set_state(SessionInput::EngineError);
            }
            EngineEvent::Ended => {
                self.control.set_state(SessionInput::EngineEnded);
            }
        }
    }

    /// Accepts finalized transcript text (live or fallback), appends a
    /// segment and runs the parse -> normalize pipeline synchronously so
    /// actions leave in speech order.
    async fn accept_final(&mut self, text: String) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let segment = TranscriptSegment {
            id: next_segment_id(),
            text: trimmed.to_string(),
            captured_at: self.clock.now(),
        };

        self.last_partial = None;
        self.saw_final = true;
        // A finalized transcript destroys the pending fallback; a timer
        // that later fires finds the arm condition false and is a no-op.
        self.pending = None;
        self.fallback_deadline = None;

        let command = parse_segment(&segment.text);
        let action = normalize_action(&command);
        debug!(
            target: "capture",
            segment_id = segment.id,
            action = action.action,
            "segment parsed: {:?}",
            command
        );

        self.metrics.write().segments_final += 1;

        if self.action_tx.send(action).await.is_err() {
            debug!(target: "capture", "action channel closed; dropping action");
        }
    }

    fn handle_chunk(&mut self, chunk: AudioChunk) {
        if !self.control.should_run.load(Ordering::SeqCst)
            || self.control.paused.load(Ordering::SeqCst)
        {
            return;
        }
        // The fallback race ends at the first finalized transcript; later
        // chunks must not rebuild a buffer no timer would ever consume.
        if self.saw_final {
            return;
        }

        let clock = &self.clock;
        let pending = self.pending.get_or_insert_with(|| PendingFallback {
            chunks: Vec::new(),
            armed_at: clock.now(),
        });
        pending.chunks.push(chunk);

        if self.fallback_deadline.is_none() {
            self.fallback_deadline = Some(TokioInstant::now() + self.config.fallback_timeout);
            debug!(target: "capture", timeout_ms = self.config.fallback_timeout.as_millis() as u64, "fallback timer armed");
        }
    }

    async fn handle_fallback_fire(&mut self) {
        self.fallback_deadline = None;

        // Re-check the arm condition: a finalized transcript may have
        // arrived, or the caller may have paused, since arming.
        if self.saw_final
            || self.control.paused.load(Ordering::SeqCst)
            || !self.control.should_run.load(Ordering::SeqCst)
        {
            return;
        }

        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.chunks.is_empty() {
            return;
        }

        self.metrics.write().fallback_uploads += 1;
        info!(
            target: "capture",
            chunks = pending.chunks.len(),
            waited_ms = pending.armed_at.elapsed().as_millis() as u64,
            "no finalized transcript in time; invoking fallback transcription"
        );

        match self
            .fallback
            .transcribe(&pending.chunks, &self.config.language)
            .await
        {
            Ok(Some(text)) => self.accept_final(text).await,
            Ok(None) => debug!(target: "capture", "fallback service produced no transcript"),
            Err(e) => {
                self.metrics.write().fallback_failures += 1;
                warn!(target: "capture", "fallback transcription failed (continuing): {}", e);
            }
        }
    }
}
