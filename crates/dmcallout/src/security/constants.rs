//! Constants for classic SSP and LE SMP capability exchange

// IO Capability values (shared by SSP and SMP, KeyboardDisplay is LE only)
pub const IO_CAPABILITY_DISPLAY_ONLY: u8 = 0x00;
pub const IO_CAPABILITY_DISPLAY_YES_NO: u8 = 0x01;
pub const IO_CAPABILITY_KEYBOARD_ONLY: u8 = 0x02;
pub const IO_CAPABILITY_NO_INPUT_NO_OUTPUT: u8 = 0x03;
pub const IO_CAPABILITY_KEYBOARD_DISPLAY: u8 = 0x04;

// OOB data present values
pub const OOB_DATA_NOT_PRESENT: u8 = 0x00;
pub const OOB_DATA_PRESENT: u8 = 0x01;

// Classic authentication requirements (HCI IO Capability Request Reply)
pub const AUTH_REQ_MITM_NOT_REQUIRED_NO_BONDING: u8 = 0x00;
pub const AUTH_REQ_MITM_REQUIRED_NO_BONDING: u8 = 0x01;
pub const AUTH_REQ_MITM_NOT_REQUIRED_DEDICATED_BONDING: u8 = 0x02;
pub const AUTH_REQ_MITM_REQUIRED_DEDICATED_BONDING: u8 = 0x03;
pub const AUTH_REQ_MITM_NOT_REQUIRED_GENERAL_BONDING: u8 = 0x04;
pub const AUTH_REQ_MITM_REQUIRED_GENERAL_BONDING: u8 = 0x05;

// LE authentication requirements bit masks
pub const SMP_AUTH_REQ_BONDING: u8 = 0x01;
pub const SMP_AUTH_REQ_MITM: u8 = 0x04;
pub const SMP_AUTH_REQ_SC: u8 = 0x08;
pub const SMP_AUTH_REQ_KEYPRESS: u8 = 0x10;
pub const SMP_AUTH_REQ_CT2: u8 = 0x20;
pub const SMP_AUTH_REQ_RFU: u8 = 0xC0;

// SMP key distribution bit masks
pub const SMP_KEY_DIST_ENC_KEY: u8 = 0x01;
pub const SMP_KEY_DIST_ID_KEY: u8 = 0x02;
pub const SMP_KEY_DIST_SIGN_KEY: u8 = 0x04;
pub const SMP_KEY_DIST_LINK_KEY: u8 = 0x08;
pub const SMP_KEY_DIST_ALL: u8 = 0x0F;

// SMP encryption key size limits
pub const SMP_MIN_ENCRYPTION_KEY_SIZE: u8 = 7;
pub const SMP_MAX_ENCRYPTION_KEY_SIZE: u8 = 16;

// Local key reload mask bits
pub const LOCAL_KEY_TYPE_ID: u8 = 0x01;
pub const LOCAL_KEY_TYPE_ER: u8 = 0x02;

/// Size in octets of every 128-bit key and OOB value handled here
pub const KEY_SIZE: usize = 16;
