//! SCO audio pump
//!
//! Moves audio frames between the link layer and an [`AudioBackend`] for
//! the one synchronous connection that may be open at a time. The pump is
//! either Closed (no session) or Open; opening while Open replaces the old
//! session and discards everything it still held.
//!
//! Nothing here fails towards the link layer: a missing, failed or
//! unallocatable outbound frame becomes an empty frame, and a lost inbound
//! frame is still delivered as zeroed samples so the sink stays in step
//! with the air interface.

use super::backend::AudioBackend;
use super::constants::*;
use super::packet::ScoPacket;
use super::types::*;
use log::{debug, info, trace, warn};
use std::collections::TryReserveError;
use std::collections::VecDeque;

/// Pump for a single SCO connection
#[derive(Debug)]
pub struct ScoAudioPump<B: AudioBackend> {
    backend: B,
    session: Option<ScoSession>,
    /// Outbound audio pulled from the backend but not yet framed out
    staged: VecDeque<Vec<u8>>,
    last_token: u64,
}

impl<B: AudioBackend> ScoAudioPump<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
            staged: VecDeque::new(),
            last_token: SessionToken::NONE.0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&ScoSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Open a session. A packet size of 0 selects the maximum SCO data
    /// size, larger sizes are clamped to it.
    pub fn open_session(&mut self, handle: u16, packet_size: u8, event: u16) -> SessionToken {
        if let Some(prior) = self.session.take() {
            warn!(
                "SCO session {} (handle {:#06x}) still open, replacing it",
                prior.token, prior.handle
            );
            self.discard_session();
        }

        if handle & !SCO_HANDLE_MASK != 0 {
            warn!("SCO handle {:#06x} wider than 12 bits", handle);
        }

        let packet_size = match packet_size {
            0 => SCO_DATA_SIZE_MAX,
            size => size.min(SCO_DATA_SIZE_MAX),
        };

        self.last_token += 1;
        let session = ScoSession {
            handle: handle & SCO_HANDLE_MASK,
            packet_size,
            event,
            token: SessionToken(self.last_token),
        };

        info!(
            "SCO session {} opened: handle={:#06x} packet_size={} event={:#06x}",
            session.token, session.handle, session.packet_size, session.event
        );
        self.backend.on_open(&session);
        self.session = Some(session);
        session.token
    }

    /// Close the open session. Staged outbound audio is dropped, and frames
    /// already handed out stop being current.
    pub fn close_session(&mut self) {
        match self.session.take() {
            Some(session) => {
                info!("SCO session {} closed", session.token);
                self.discard_session();
            }
            None => debug!("SCO close without an open session"),
        }
    }

    fn discard_session(&mut self) {
        if !self.staged.is_empty() {
            debug!("Dropping {} staged SCO frames", self.staged.len());
            self.staged.clear();
        }
        self.backend.on_close();
    }

    /// Next frame to transmit. Never blocks on the backend and never fails:
    /// when no audio is available the frame is empty.
    pub fn pull_outbound_frame(&mut self) -> AudioFrame {
        let Some(session) = self.session else {
            trace!("SCO pull while closed");
            return AudioFrame::empty(SessionToken::NONE);
        };
        let packet_size = session.packet_size as usize;

        if let Some(data) = self.staged.pop_front() {
            return AudioFrame::new(data, ScoDataStatus::Valid, session.token);
        }

        let data = match self.backend.pull(packet_size) {
            Ok(Some(data)) if !data.is_empty() => data,
            Ok(_) => {
                trace!("SCO backend has no outbound audio");
                return AudioFrame::empty(session.token);
            }
            Err(e) => {
                warn!("SCO backend pull failed: {}", e);
                return AudioFrame::empty(session.token);
            }
        };

        if data.len() <= packet_size {
            return AudioFrame::new(data, ScoDataStatus::Valid, session.token);
        }

        match split_frames(&data, packet_size) {
            Ok(mut frames) => {
                let first = frames.pop_front().unwrap_or_default();
                self.staged.extend(frames);
                AudioFrame::new(first, ScoDataStatus::Valid, session.token)
            }
            Err(e) => {
                warn!("SCO frame allocation failed: {}", e);
                AudioFrame::empty(session.token)
            }
        }
    }

    /// Deliver an inbound frame to the backend. Lost frames are delivered
    /// as zeroed placeholders; frames longer than the packet size are cut.
    pub fn push_inbound_frame(&mut self, data: Vec<u8>, status: ScoDataStatus) {
        let Some(session) = self.session else {
            debug!("SCO frame received while closed, discarding");
            return;
        };
        let packet_size = session.packet_size as usize;

        let mut data = data;
        if data.len() > packet_size {
            warn!(
                "SCO frame of {} bytes exceeds packet size {}",
                data.len(),
                packet_size
            );
            data.truncate(packet_size);
        }

        if status.is_lost() {
            let len = if data.is_empty() { packet_size } else { data.len() };
            data.clear();
            data.resize(len, 0);
        }

        trace!("SCO inbound {} bytes, {:?}", data.len(), status);
        if let Err(e) = self.backend.push(AudioFrame::new(data, status, session.token)) {
            warn!("SCO backend push failed: {}", e);
        }
    }

    /// Whether `frame` belongs to the session that is open now
    pub fn is_current(&self, frame: &AudioFrame) -> bool {
        match &self.session {
            Some(session) => frame.session() == session.token,
            None => false,
        }
    }

    /// Gate between a pulled frame and the air interface: frames from a
    /// closed or replaced session are dropped here.
    pub fn claim_for_transmit(&self, frame: AudioFrame) -> Option<AudioFrame> {
        if self.is_current(&frame) {
            Some(frame)
        } else {
            debug!("Dropping stale SCO frame from session {}", frame.session());
            None
        }
    }

    /// Parse an HCI SCO data packet and deliver its payload. Packets that
    /// do not parse or belong to another handle are dropped.
    pub fn receive_packet(&mut self, raw: &[u8]) {
        let packet = match ScoPacket::parse(raw) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Dropping malformed SCO packet: {}", e);
                return;
            }
        };

        let Some(session) = self.session else {
            debug!("SCO packet received while closed, discarding");
            return;
        };
        if session.handle != packet.handle {
            warn!(
                "SCO packet for handle {:#06x}, session uses {:#06x}",
                packet.handle, session.handle
            );
            return;
        }

        self.push_inbound_frame(packet.data, packet.status);
    }

    /// Next HCI SCO data packet for the open session. An empty frame is
    /// sent as one packet of silence.
    pub fn next_packet(&mut self) -> Option<Vec<u8>> {
        let session = self.session?;
        let frame = self.pull_outbound_frame();

        let data = if frame.is_empty() {
            vec![0u8; session.packet_size as usize]
        } else {
            frame.into_data()
        };

        match ScoPacket::new(session.handle, ScoDataStatus::Valid, data).serialize() {
            Ok(packet) => Some(packet),
            Err(e) => {
                warn!("SCO packet encoding failed: {}", e);
                None
            }
        }
    }
}

/// Split `data` into frames of at most `size` bytes
fn split_frames(data: &[u8], size: usize) -> Result<VecDeque<Vec<u8>>, TryReserveError> {
    let mut frames = VecDeque::new();
    frames.try_reserve_exact(data.len().div_ceil(size))?;
    for chunk in data.chunks(size) {
        let mut frame = Vec::new();
        frame.try_reserve_exact(chunk.len())?;
        frame.extend_from_slice(chunk);
        frames.push_back(frame);
    }
    Ok(frames)
}
