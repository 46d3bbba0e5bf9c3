//! Status and module type lookup tables.
//!
//! Each table is an ordered list of `(code, label)` pairs searched front to
//! back; the first matching code wins. A code with no entry yields `None`.

use crate::constants::*;
use crate::types::Endpoint;

/// Ordered `(code, label)` table.
pub type LookupTable = &'static [(u8, &'static str)];

/// Device Management status codes.
pub const DEVMGMT_STATUS_TABLE: LookupTable = &[
    (DEVMGMT_STATUS_OK, "ok"),
    (DEVMGMT_STATUS_ERROR, "error"),
    (DEVMGMT_STATUS_CMD_NOT_SUPPORTED, "command not supported"),
    (DEVMGMT_STATUS_WRONG_PARAMETER, "wrong parameter"),
    (DEVMGMT_STATUS_WRONG_DEVICE_MODE, "wrong device mode"),
];

/// LoRaWAN status codes.
pub const LORAWAN_STATUS_TABLE: LookupTable = &[
    (LORAWAN_STATUS_OK, "ok"),
    (LORAWAN_STATUS_ERROR, "error"),
    (LORAWAN_STATUS_CMD_NOT_SUPPORTED, "command not supported"),
    (LORAWAN_STATUS_WRONG_PARAMETER, "wrong parameter"),
    (LORAWAN_STATUS_WRONG_DEVICE_MODE, "wrong device mode"),
    (LORAWAN_STATUS_DEVICE_NOT_ACTIVATED, "device not activated"),
    (LORAWAN_STATUS_DEVICE_BUSY, "device busy - command rejected"),
    (LORAWAN_STATUS_QUEUE_FULL, "message queue full - command rejected"),
    (LORAWAN_STATUS_LENGTH_ERROR, "HCI message length error"),
    (LORAWAN_STATUS_NO_FACTORY_SETTINGS, "no factory settings available"),
    (
        LORAWAN_STATUS_CHANNEL_BLOCKED_BY_DC,
        "error: channel blocked due to duty cycle, please try later again",
    ),
    (LORAWAN_STATUS_CHANNEL_NOT_AVAILABLE, "error: channel not available"),
];

/// Module type codes reported by get-device-info.
pub const MODULE_TYPE_TABLE: LookupTable = &[
    (0x90, "iM880A (obsolete)"),
    (0x92, "iM880A-L (128k)"),
    (0x93, "iU880A (128k)"),
    (0x98, "iM880B-L"),
    (0x99, "iU880B"),
    (0x9A, "iM980A (iMAS923TH for Thailand)"),
    (0xA0, "iM881A"),
];

/// Find the label for `code`, first match wins.
pub fn lookup(table: LookupTable, code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry, _)| *entry == code)
        .map(|(_, label)| *label)
}

/// Status label for a response from `endpoint`.
pub fn status_label(endpoint: Endpoint, code: u8) -> Option<&'static str> {
    match endpoint {
        Endpoint::DevMgmt => lookup(DEVMGMT_STATUS_TABLE, code),
        Endpoint::LoRaWan => lookup(LORAWAN_STATUS_TABLE, code),
    }
}

/// Module name for a module type code.
pub fn module_type_label(code: u8) -> Option<&'static str> {
    lookup(MODULE_TYPE_TABLE, code)
}
