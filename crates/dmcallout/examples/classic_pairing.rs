/// Example walking through the classic SSP callouts for one peer
use dmcallout::*;
use std::sync::Arc;

struct PrintingOobChannel;

impl OobChannel for PrintingOobChannel {
    fn local_oob_ready(&self, data: Option<&OobData>) {
        match data {
            Some(_) => println!("Local OOB data ready for the platform"),
            None => println!("Local OOB data could not be read"),
        }
    }

    fn request_remote_oob(&self, peer: BdAddr) {
        println!("Platform asked for OOB data of {}", peer);
    }
}

fn main() -> Result<()> {
    println!("Classic Pairing Example");
    println!("-----------------------");

    let peer: BdAddr = "AA:BB:CC:DD:EE:FF".parse()?;
    let config = TrustConfig::default().with_oob_peer(peer);
    let negotiator = PairingNegotiator::new(
        CapabilityPolicy::new(Arc::new(config)),
        Arc::new(PrintingOobChannel),
    );

    let caps = negotiator.request_local_io_capability(&peer, true);
    println!(
        "Local: io_cap={} oob={:?} auth_req={:#04x}",
        caps.io_capability,
        caps.oob,
        caps.auth_req.to_u8()
    );

    negotiator.report_remote_io_capability_raw(&peer, 0x01, 0x00, 0x05);
    if let Some(report) = negotiator.remote_log().latest_for(&peer) {
        println!("Remote: {:?}", report);
    }

    if caps.oob.is_present() {
        negotiator.request_remote_oob(&peer);
    }
    negotiator.report_local_oob(true, OobData::new([0x5A; 16], [0xA5; 16]));

    Ok(())
}
