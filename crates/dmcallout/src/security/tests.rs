//! Unit tests for the security vocabulary

use super::constants::*;
use super::*;

#[test]
fn test_io_capability_conversion() {
    for value in 0..=4u8 {
        let cap = IoCapability::from_u8(value).unwrap();
        assert_eq!(cap.to_u8(), value);
    }
    assert_eq!(IoCapability::from_u8(5), None);
    assert_eq!(IoCapability::from_u8(0xFF), None);

    assert!(IoCapability::DisplayYesNo.is_valid_classic());
    assert!(IoCapability::NoInputNoOutput.is_valid_classic());
    assert!(!IoCapability::KeyboardDisplay.is_valid_classic());
}

#[test]
fn test_oob_availability() {
    assert_eq!(OobAvailability::from(true), OobAvailability::Present);
    assert_eq!(OobAvailability::from(false), OobAvailability::NotPresent);
    assert_eq!(OobAvailability::default(), OobAvailability::NotPresent);

    // Peers may send the P-192/P-256 variants, all of them mean present
    assert!(OobAvailability::from_u8(0x03).is_present());
    assert!(!OobAvailability::from_u8(0x00).is_present());
}

#[test]
fn test_classic_auth_requirement_values() {
    let req = ClassicAuthRequirement::new(Bonding::NoBonding, true);
    assert_eq!(req, ClassicAuthRequirement::MitmRequiredNoBonding);
    assert_eq!(req.to_u8(), AUTH_REQ_MITM_REQUIRED_NO_BONDING);
    assert!(req.requires_mitm());
    assert_eq!(req.bonding(), Bonding::NoBonding);

    let req = ClassicAuthRequirement::new(Bonding::General, false);
    assert_eq!(req.to_u8(), 0x04);
    assert!(!req.requires_mitm());
    assert_eq!(req.bonding(), Bonding::General);

    for value in 0..=5u8 {
        assert_eq!(ClassicAuthRequirement::from_u8(value).to_u8(), value);
    }
}

#[test]
fn test_classic_auth_requirement_reserved_values_are_strict() {
    let req = ClassicAuthRequirement::from_u8(0x06);
    assert_eq!(req, ClassicAuthRequirement::MitmRequiredGeneralBonding);

    let req = ClassicAuthRequirement::from_u8(0xFF);
    assert!(req.requires_mitm());
}

#[test]
fn test_le_auth_requirements() {
    let auth = AuthRequirements::default();
    assert_eq!(auth.to_u8(), 0x2D);

    let auth = AuthRequirements::from_u8(0x05);
    assert!(auth.bonding);
    assert!(auth.mitm);
    assert!(!auth.secure_connections);
    assert_eq!(auth, AuthRequirements::new(true, true, false));

    assert!(AuthRequirements::has_rfu_bits(0x45));
    assert!(!AuthRequirements::has_rfu_bits(0x3D));
    // RFU bits never survive a round through the struct
    assert_eq!(AuthRequirements::from_u8(0xFF).to_u8(), 0x3D);
}

#[test]
fn test_key_distribution_bits() {
    let keys = KeyDistribution::ENC | KeyDistribution::ID;
    assert_eq!(keys.bits(), 0x03);
    assert_eq!(KeyDistribution::all().bits(), SMP_KEY_DIST_ALL);
    assert_eq!(KeyDistribution::from_bits(0x10), None);
    assert_eq!(
        KeyDistribution::from_bits_truncate(0x15),
        KeyDistribution::ENC | KeyDistribution::SIGN
    );
}

#[test]
fn test_oob_data_is_redacted() {
    let data = OobData::new([0xAB; 16], [0xCD; 16]);
    assert_eq!(data.confirmation(), &[0xAB; 16]);
    assert_eq!(data.randomizer(), &[0xCD; 16]);
    assert!(!data.is_zero());

    assert_eq!(format!("{:?}", data), "OobData { .. }");

    assert!(OobData::zeroed().is_zero());
}

#[test]
fn test_oob_data_zeroize() {
    use zeroize::Zeroize;

    let mut data = OobData::new([0x11; 16], [0x22; 16]);
    data.zeroize();
    assert!(data.is_zero());
}

fn sample_keys() -> LocalKeyReload {
    LocalKeyReload {
        mask: LocalKeyMask::ID | LocalKeyMask::ER,
        er: [0x01; 16],
        id_keys: LocalIdKeys {
            ir: [0x02; 16],
            irk: [0x03; 16],
            dhk: [0x04; 16],
        },
    }
}

#[test]
fn test_stored_keys_encode_decode() {
    let keys = sample_keys();
    let stored = StoredLocalKeys::encode(&keys);
    assert_eq!(stored.er.as_deref(), Some("01010101010101010101010101010101"));

    let decoded = stored.decode().unwrap();
    assert_eq!(decoded, keys);
}

#[test]
fn test_stored_keys_partial_identity_set() {
    let stored = StoredLocalKeys {
        er: None,
        ir: Some(hex::encode([0x02; 16])),
        irk: None,
        dhk: Some(hex::encode([0x04; 16])),
    };

    let decoded = stored.decode().unwrap();
    assert!(decoded.is_none());
    assert!(decoded.id_keys.is_zero());
}

#[test]
fn test_stored_keys_corrupt_entries() {
    let stored = StoredLocalKeys {
        er: Some("not hex".into()),
        ..Default::default()
    };
    assert!(matches!(
        stored.decode(),
        Err(KeyStoreError::Corrupt { entry: "ER", .. })
    ));

    let stored = StoredLocalKeys {
        irk: Some("0102".into()),
        ..Default::default()
    };
    assert!(matches!(
        stored.decode(),
        Err(KeyStoreError::Corrupt { entry: "IRK", .. })
    ));
}

#[test]
fn test_memory_key_store() {
    let store = MemoryKeyStore::new();
    assert_eq!(store.load().unwrap(), None);

    store.save(StoredLocalKeys::encode(&sample_keys())).unwrap();
    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.decode().unwrap(), sample_keys());

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);

    let store = MemoryKeyStore::with_keys(&sample_keys());
    assert!(store.load().unwrap().is_some());
}

#[test]
fn test_key_material_is_not_printed() {
    let printed = format!("{:?}", sample_keys());
    assert!(printed.contains("mask"));
    assert!(!printed.contains("[1, 1"));

    let stored = StoredLocalKeys::encode(&sample_keys());
    assert!(!format!("{:?}", stored).contains("0101"));
}
