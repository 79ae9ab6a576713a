/// Example reloading local LE keys and answering an SMP pairing request
use dmcallout::security::{LocalIdKeys, LocalKeyMask, StoredLocalKeys};
use dmcallout::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("LE Local Keys Example");
    println!("---------------------");

    let options = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0xD,0x4,0xf,0xf,0x10".to_string());
    let policy = CapabilityPolicy::new(Arc::new(TrustConfig::from_smp_options(&options)));

    let store = Arc::new(MemoryKeyStore::new());
    let negotiator = BleSecurityNegotiator::new(policy, store.clone());

    let keys = negotiator.load_local_identity_keys();
    println!("First boot: mask={:?}", keys.mask);

    // Keys generated elsewhere are saved, then the cache is dropped
    store.save(StoredLocalKeys::encode(&LocalKeyReload {
        mask: LocalKeyMask::ID | LocalKeyMask::ER,
        er: [0x11; 16],
        id_keys: LocalIdKeys {
            ir: [0x22; 16],
            irk: [0x33; 16],
            dhk: [0x44; 16],
        },
    }))?;
    negotiator.invalidate_local_keys();
    println!("After save: mask={:?}", negotiator.load_local_identity_keys().mask);

    let peer: BdAddr = "11:22:33:44:55:66".parse()?;
    let caps = negotiator.request_local_ble_io_capability(&peer);
    println!(
        "io_cap={} auth_req={:#04x} max_key_size={} init_keys={:?} resp_keys={:?}",
        caps.io_capability,
        caps.auth_req.to_u8(),
        caps.max_key_size,
        caps.initiator_keys,
        caps.responder_keys
    );

    Ok(())
}
