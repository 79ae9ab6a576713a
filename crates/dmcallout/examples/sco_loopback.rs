/// Example pumping SCO audio through the in-memory backend
use dmcallout::*;

fn main() {
    println!("SCO Loopback Example");
    println!("--------------------");

    let mut pump = ScoAudioPump::new(MemoryAudioBackend::new());
    pump.open_session(0x0007, 60, 0x1003);

    // 2.5 frames worth of outbound audio
    pump.backend_mut().queue_outbound(vec![0x10; 150]);

    for _ in 0..4 {
        match pump.next_packet() {
            Some(packet) => {
                println!("TX {} bytes: {:02X?}", packet.len(), &packet[..6]);
                // Loop the packet straight back in
                pump.receive_packet(&packet);
            }
            None => println!("No session"),
        }
    }

    // A lost interval from the air still reaches the sink
    pump.push_inbound_frame(Vec::new(), ScoDataStatus::FullyLost);

    for frame in pump.backend_mut().take_delivered() {
        println!("RX {} bytes {:?}", frame.len(), frame.status());
    }

    pump.close_session();
}
