//! Scripted recognition engine for tests and offline transcript replay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use vanibill_foundation::CaptureError;

use crate::engine::RecognitionEngine;
use crate::types::EngineEvent;

/// Replays a fixed list of utterances as finalized recognition results.
/// Each `start()` emits `Started`, the scripted lines (optionally spaced by
/// a delay), then `Ended`. `stop()`/`abort()` cancel the replay.
pub struct ScriptedEngine {
    lines: Vec<String>,
    line_delay: Duration,
    tx: mpsc::Sender<EngineEvent>,
    cancelled: Arc<AtomicBool>,
}

impl ScriptedEngine {
    pub fn new(lines: Vec<String>, line_delay: Duration) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel(64);
        (
            Self {
                lines,
                line_delay,
                tx,
                cancelled: Arc::new(AtomicBool::new(false)),
            },
            rx,
        )
    }
}

#[async_trait]
impl RecognitionEngine for ScriptedEngine {
    async fn start(&mut self, language: &str) -> Result<(), CaptureError> {
        debug!(target: "capture", language, lines = self.lines.len(), "scripted engine starting");
        self.cancelled.store(false, Ordering::SeqCst);

        let tx = self.tx.clone();
        let lines = self.lines.clone();
        let delay = self.line_delay;
        let cancelled = Arc::clone(&self.cancelled);

        tokio::spawn(async move {
            let _ = tx.send(EngineEvent::Started).await;
            for line in lines {
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let _ = tx
                    .send(EngineEvent::Result {
                        text: line,
                        is_final: true,
                    })
                    .await;
            }
            let _ = tx.send(EngineEvent::Ended).await;
        });

        Ok(())
    }

    async fn stop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    async fn abort(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
