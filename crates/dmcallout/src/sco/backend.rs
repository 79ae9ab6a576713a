//! Application side of the SCO audio path

use super::types::*;
use std::collections::VecDeque;

/// Audio source and sink behind the pump.
///
/// Both directions are called from the link scheduler's time-critical
/// path and must return well within one packet interval.
pub trait AudioBackend {
    /// A session was opened
    fn on_open(&mut self, _session: &ScoSession) {}

    /// The session was closed, treat as end of stream
    fn on_close(&mut self) {}

    /// Up to `max_len` bytes of outbound audio, `None` if nothing is buffered
    fn pull(&mut self, max_len: usize) -> Result<Option<Vec<u8>>, AudioError>;

    /// Deliver an inbound frame
    fn push(&mut self, frame: AudioFrame) -> Result<(), AudioError>;
}

/// In-memory backend: outbound audio is queued by the application and
/// inbound frames are collected for it to read.
#[derive(Debug, Default)]
pub struct MemoryAudioBackend {
    outbound: VecDeque<Vec<u8>>,
    delivered: Vec<AudioFrame>,
    streaming: bool,
}

impl MemoryAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outbound audio; chunks are handed out in order
    pub fn queue_outbound(&mut self, data: Vec<u8>) {
        self.outbound.push_back(data);
    }

    /// Inbound frames received so far
    pub fn delivered(&self) -> &[AudioFrame] {
        &self.delivered
    }

    pub fn take_delivered(&mut self) -> Vec<AudioFrame> {
        std::mem::take(&mut self.delivered)
    }

    /// Whether a session is currently open
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }
}

impl AudioBackend for MemoryAudioBackend {
    fn on_open(&mut self, _session: &ScoSession) {
        self.streaming = true;
    }

    fn on_close(&mut self) {
        self.streaming = false;
        self.outbound.clear();
    }

    fn pull(&mut self, _max_len: usize) -> Result<Option<Vec<u8>>, AudioError> {
        Ok(self.outbound.pop_front())
    }

    fn push(&mut self, frame: AudioFrame) -> Result<(), AudioError> {
        self.delivered.push(frame);
        Ok(())
    }
}
