//! Unit tests for the SCO audio path

use super::constants::*;
use super::*;

/// Backend whose failures can be switched on
#[derive(Default)]
struct FlakyBackend {
    fail_pull: bool,
    fail_push: bool,
    pushed: usize,
}

impl AudioBackend for FlakyBackend {
    fn pull(&mut self, max_len: usize) -> Result<Option<Vec<u8>>, AudioError> {
        if self.fail_pull {
            Err(AudioError::Exhausted)
        } else {
            Ok(Some(vec![0x55; max_len]))
        }
    }

    fn push(&mut self, _frame: AudioFrame) -> Result<(), AudioError> {
        self.pushed += 1;
        if self.fail_push {
            Err(AudioError::Disconnected)
        } else {
            Ok(())
        }
    }
}

fn open_pump() -> ScoAudioPump<MemoryAudioBackend> {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    pump.open_session(7, 60, 0x1003);
    pump
}

#[test]
fn test_pull_with_empty_backend_returns_empty_frame() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    let token = pump.open_session(7, 60, 0x1003);

    let frame = pump.pull_outbound_frame();
    assert!(frame.is_empty());
    assert_eq!(frame.status(), ScoDataStatus::NoData);
    assert_eq!(frame.session(), token);
    assert!(pump.is_current(&frame));
}

#[test]
fn test_open_records_session() {
    let pump = open_pump();
    let session = pump.session().unwrap();

    assert_eq!(session.handle, 7);
    assert_eq!(session.packet_size, 60);
    assert_eq!(session.event, 0x1003);
    assert_ne!(session.token, SessionToken::NONE);
    assert!(pump.backend().is_streaming());
}

#[test]
fn test_open_normalizes_parameters() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());

    pump.open_session(0xF123, 0, 0);
    assert_eq!(pump.session().unwrap().handle, 0x0123);
    assert_eq!(pump.session().unwrap().packet_size, SCO_DATA_SIZE_MAX);

    pump.open_session(1, 255, 0);
    assert_eq!(pump.session().unwrap().packet_size, SCO_DATA_SIZE_MAX);
}

#[test]
fn test_pull_while_closed() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    pump.backend_mut().queue_outbound(vec![1, 2, 3]);

    let frame = pump.pull_outbound_frame();
    assert!(frame.is_empty());
    assert_eq!(frame.session(), SessionToken::NONE);
    assert!(!pump.is_current(&frame));
    assert!(pump.claim_for_transmit(frame).is_none());
}

#[test]
fn test_pull_outbound_audio() {
    let mut pump = open_pump();
    pump.backend_mut().queue_outbound(vec![0xAA; 60]);
    pump.backend_mut().queue_outbound(vec![0xBB; 20]);

    let frame = pump.pull_outbound_frame();
    assert_eq!(frame.data(), &[0xAA; 60][..]);
    assert_eq!(frame.status(), ScoDataStatus::Valid);

    let frame = pump.pull_outbound_frame();
    assert_eq!(frame.len(), 20);

    assert!(pump.pull_outbound_frame().is_empty());
}

#[test]
fn test_large_chunks_are_split_to_packet_size() {
    let mut pump = open_pump();
    let data: Vec<u8> = (0..150u8).collect();
    pump.backend_mut().queue_outbound(data.clone());

    let frames: Vec<AudioFrame> = (0..3).map(|_| pump.pull_outbound_frame()).collect();
    assert_eq!(frames[0].data(), &data[0..60]);
    assert_eq!(frames[1].data(), &data[60..120]);
    assert_eq!(frames[2].data(), &data[120..150]);
    assert!(frames.iter().all(|f| f.len() <= 60));
    assert!(pump.pull_outbound_frame().is_empty());
}

#[test]
fn test_close_drops_staged_audio() {
    let mut pump = open_pump();
    pump.backend_mut().queue_outbound(vec![0x11; 150]);

    let first = pump.pull_outbound_frame();
    assert_eq!(first.len(), 60);

    pump.close_session();
    assert!(!pump.is_open());
    assert!(!pump.backend().is_streaming());

    pump.open_session(7, 60, 0x1003);
    let frame = pump.pull_outbound_frame();
    assert!(frame.is_empty());
}

#[test]
fn test_no_stale_frame_after_close() {
    let mut pump = open_pump();
    pump.backend_mut().queue_outbound(vec![0x22; 40]);

    let frame = pump.pull_outbound_frame();
    assert!(!frame.is_empty());

    pump.close_session();
    assert!(!pump.is_current(&frame));
    assert!(pump.claim_for_transmit(frame).is_none());
}

#[test]
fn test_no_stale_frame_after_reopen() {
    let mut pump = open_pump();
    pump.backend_mut().queue_outbound(vec![0x22; 40]);
    let old = pump.pull_outbound_frame();

    pump.close_session();
    pump.open_session(7, 60, 0x1003);

    assert!(pump.claim_for_transmit(old).is_none());

    let fresh = pump.pull_outbound_frame();
    assert!(pump.claim_for_transmit(fresh).is_some());
}

#[test]
fn test_open_while_open_replaces_session() {
    let mut pump = open_pump();
    let first_token = pump.session().unwrap().token;
    pump.backend_mut().queue_outbound(vec![0x33; 150]);
    let in_flight = pump.pull_outbound_frame();

    let second_token = pump.open_session(9, 48, 0x2000);

    assert_ne!(first_token, second_token);
    assert_eq!(pump.session().unwrap().handle, 9);
    assert_eq!(pump.session().unwrap().packet_size, 48);
    assert!(pump.backend().is_streaming());
    assert!(pump.claim_for_transmit(in_flight).is_none());
    // Remainder of the old session's audio is gone
    assert!(pump.pull_outbound_frame().is_empty());
}

#[test]
fn test_close_without_session_is_harmless() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    pump.close_session();
    pump.close_session();
    assert!(!pump.is_open());
}

#[test]
fn test_inbound_valid_frame_is_delivered() {
    let mut pump = open_pump();
    let token = pump.session().unwrap().token;

    pump.push_inbound_frame(vec![1, 2, 3, 4], ScoDataStatus::Valid);
    pump.push_inbound_frame(vec![5, 6], ScoDataStatus::PartiallyLost);

    let delivered = pump.backend_mut().take_delivered();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0], AudioFrame::new(vec![1, 2, 3, 4], ScoDataStatus::Valid, token));
    assert_eq!(delivered[1].data(), &[5, 6]);
    assert_eq!(delivered[1].status(), ScoDataStatus::PartiallyLost);
}

#[test]
fn test_inbound_lost_frames_become_silence() {
    let mut pump = open_pump();

    pump.push_inbound_frame(vec![0xFF; 30], ScoDataStatus::FullyLost);
    pump.push_inbound_frame(Vec::new(), ScoDataStatus::FullyLost);
    pump.push_inbound_frame(Vec::new(), ScoDataStatus::NoData);

    let delivered = pump.backend().delivered();
    assert_eq!(delivered.len(), 3);
    assert_eq!(delivered[0].data(), &[0u8; 30][..]);
    assert_eq!(delivered[0].status(), ScoDataStatus::FullyLost);
    assert_eq!(delivered[1].data(), &[0u8; 60][..]);
    assert_eq!(delivered[2].len(), 60);
    assert_eq!(delivered[2].status(), ScoDataStatus::NoData);
}

#[test]
fn test_inbound_frame_count_parity() {
    let mut pump = open_pump();
    let statuses = [
        ScoDataStatus::Valid,
        ScoDataStatus::FullyLost,
        ScoDataStatus::PartiallyLost,
        ScoDataStatus::FullyLost,
        ScoDataStatus::NoData,
        ScoDataStatus::Valid,
    ];

    for (i, status) in statuses.iter().enumerate() {
        pump.push_inbound_frame(vec![i as u8; 60], *status);
    }

    let delivered = pump.backend().delivered();
    assert_eq!(delivered.len(), statuses.len());
    for (frame, status) in delivered.iter().zip(statuses.iter()) {
        assert_eq!(frame.status(), *status);
        assert_eq!(frame.len(), 60);
    }
}

#[test]
fn test_inbound_oversized_frame_is_truncated() {
    let mut pump = open_pump();
    pump.push_inbound_frame(vec![0x44; 100], ScoDataStatus::Valid);

    assert_eq!(pump.backend().delivered()[0].len(), 60);
}

#[test]
fn test_inbound_while_closed_is_discarded() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    pump.push_inbound_frame(vec![1, 2, 3], ScoDataStatus::FullyLost);
    assert!(pump.backend().delivered().is_empty());
}

#[test]
fn test_backend_failures_degrade() {
    let mut pump = ScoAudioPump::new(FlakyBackend::default());
    pump.open_session(1, 60, 0);

    assert_eq!(pump.pull_outbound_frame().len(), 60);

    pump.backend_mut().fail_pull = true;
    let frame = pump.pull_outbound_frame();
    assert!(frame.is_empty());
    assert!(pump.is_current(&frame));

    pump.backend_mut().fail_push = true;
    pump.push_inbound_frame(vec![0; 60], ScoDataStatus::Valid);
    pump.push_inbound_frame(vec![0; 60], ScoDataStatus::FullyLost);
    assert_eq!(pump.backend().pushed, 2);
}

#[test]
fn test_packet_status_flags() {
    assert_eq!(ScoDataStatus::from_wire(0b00), ScoDataStatus::Valid);
    assert_eq!(ScoDataStatus::from_wire(0b01), ScoDataStatus::PartiallyLost);
    assert_eq!(ScoDataStatus::from_wire(0b10), ScoDataStatus::FullyLost);
    assert_eq!(ScoDataStatus::from_wire(0b11), ScoDataStatus::PartiallyLost);

    assert_eq!(ScoDataStatus::NoData.to_wire(), SCO_PACKET_STATUS_NO_DATA);
    assert!(ScoDataStatus::NoData.is_lost());
    assert!(!ScoDataStatus::PartiallyLost.is_lost());
}

#[test]
fn test_sco_packet_parsing() {
    // Handle 0x007, status "no data", 3 bytes of payload
    let raw: [u8; 6] = [0x07, 0x20, 0x03, 0xAA, 0xBB, 0xCC];
    let packet = ScoPacket::parse(&raw).unwrap();

    assert_eq!(packet.handle, 0x007);
    assert_eq!(packet.status, ScoDataStatus::FullyLost);
    assert_eq!(packet.data, vec![0xAA, 0xBB, 0xCC]);

    // Trailing bytes beyond the declared length are ignored
    let raw: [u8; 5] = [0x34, 0x12, 0x01, 0x99, 0x00];
    let packet = ScoPacket::parse(&raw).unwrap();
    assert_eq!(packet.handle, 0x234);
    assert_eq!(packet.status, ScoDataStatus::PartiallyLost);
    assert_eq!(packet.data, vec![0x99]);
}

#[test]
fn test_sco_packet_parse_errors() {
    assert_eq!(ScoPacket::parse(&[0x07]), Err(ScoPacketError::TooShort(1)));
    assert_eq!(
        ScoPacket::parse(&[0x07, 0x00, 0x04, 0x01]),
        Err(ScoPacketError::LengthMismatch {
            declared: 4,
            available: 1
        })
    );
}

#[test]
fn test_sco_packet_serialization() {
    let packet = ScoPacket::new(0x0047, ScoDataStatus::Valid, vec![1, 2]);
    assert_eq!(packet.serialize().unwrap(), vec![0x47, 0x00, 0x02, 1, 2]);

    let packet = ScoPacket::new(0x0001, ScoDataStatus::PartiallyLost, vec![]);
    assert_eq!(packet.serialize().unwrap(), vec![0x01, 0x30, 0x00]);

    let packet = ScoPacket::new(1, ScoDataStatus::Valid, vec![0; 256]);
    assert_eq!(packet.serialize(), Err(ScoPacketError::PayloadTooLarge(256)));
}

#[test]
fn test_receive_packet() {
    let mut pump = open_pump();

    pump.receive_packet(&[0x07, 0x00, 0x02, 0x10, 0x20]);
    // Another connection's packet
    pump.receive_packet(&[0x08, 0x00, 0x02, 0x10, 0x20]);
    // Malformed
    pump.receive_packet(&[0x07, 0x00]);
    // Fully lost still delivered
    pump.receive_packet(&[0x07, 0x20, 0x00]);

    let delivered = pump.backend().delivered();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].data(), &[0x10, 0x20]);
    assert_eq!(delivered[1].status(), ScoDataStatus::FullyLost);
    assert_eq!(delivered[1].len(), 60);
}

#[test]
fn test_next_packet() {
    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    assert!(pump.next_packet().is_none());

    pump.open_session(7, 4, 0x1003);
    pump.backend_mut().queue_outbound(vec![9, 8, 7, 6]);

    assert_eq!(pump.next_packet().unwrap(), vec![0x07, 0x00, 0x04, 9, 8, 7, 6]);
    // Nothing queued: a packet of silence
    assert_eq!(pump.next_packet().unwrap(), vec![0x07, 0x00, 0x04, 0, 0, 0, 0]);
}
