//! Protocol constants
//!
//! Endpoint (SAP) identifiers, message identifiers, status codes and sizes
//! used by the WiMOD LoRaWAN Host Controller Interface.

// ============================================================================
// Endpoint (SAP) Identifiers
// ============================================================================

/// Device Management endpoint.
pub const DEVMGMT_SAP_ID: u8 = 0x01;
/// LoRaWAN control endpoint.
pub const LORAWAN_SAP_ID: u8 = 0x10;

// ============================================================================
// Device Management Message Identifiers
// ============================================================================

/// Ping the module.
pub const DEVMGMT_MSG_PING_REQ: u8 = 0x01;
/// Ping response.
pub const DEVMGMT_MSG_PING_RSP: u8 = 0x02;
/// Get module type, address and id.
pub const DEVMGMT_MSG_GET_DEVICE_INFO_REQ: u8 = 0x03;
/// Device info response.
pub const DEVMGMT_MSG_GET_DEVICE_INFO_RSP: u8 = 0x04;
/// Get firmware version.
pub const DEVMGMT_MSG_GET_FW_VERSION_REQ: u8 = 0x05;
/// Firmware version response.
pub const DEVMGMT_MSG_GET_FW_VERSION_RSP: u8 = 0x06;
/// Reset the module.
pub const DEVMGMT_MSG_RESET_REQ: u8 = 0x07;
/// Reset response.
pub const DEVMGMT_MSG_RESET_RSP: u8 = 0x08;
/// Set the operation mode.
pub const DEVMGMT_MSG_SET_OPMODE_REQ: u8 = 0x09;
/// Set operation mode response.
pub const DEVMGMT_MSG_SET_OPMODE_RSP: u8 = 0x0A;
/// Get the operation mode.
pub const DEVMGMT_MSG_GET_OPMODE_REQ: u8 = 0x0B;
/// Get operation mode response.
pub const DEVMGMT_MSG_GET_OPMODE_RSP: u8 = 0x0C;
/// Set the real time clock.
pub const DEVMGMT_MSG_SET_RTC_REQ: u8 = 0x0D;
/// Set RTC response.
pub const DEVMGMT_MSG_SET_RTC_RSP: u8 = 0x0E;
/// Get the real time clock.
pub const DEVMGMT_MSG_GET_RTC_REQ: u8 = 0x0F;
/// Get RTC response.
pub const DEVMGMT_MSG_GET_RTC_RSP: u8 = 0x10;
/// Get device status counters.
pub const DEVMGMT_MSG_GET_DEVICE_STATUS_REQ: u8 = 0x17;
/// Device status response.
pub const DEVMGMT_MSG_GET_DEVICE_STATUS_RSP: u8 = 0x18;
/// Set the RTC alarm.
pub const DEVMGMT_MSG_SET_RTC_ALARM_REQ: u8 = 0x31;
/// Set RTC alarm response.
pub const DEVMGMT_MSG_SET_RTC_ALARM_RSP: u8 = 0x32;
/// Clear the RTC alarm.
pub const DEVMGMT_MSG_CLEAR_RTC_ALARM_REQ: u8 = 0x33;
/// Clear RTC alarm response.
pub const DEVMGMT_MSG_CLEAR_RTC_ALARM_RSP: u8 = 0x34;
/// Get the RTC alarm.
pub const DEVMGMT_MSG_GET_RTC_ALARM_REQ: u8 = 0x35;
/// Get RTC alarm response.
pub const DEVMGMT_MSG_GET_RTC_ALARM_RSP: u8 = 0x36;

// ============================================================================
// LoRaWAN Message Identifiers
// ============================================================================

/// Activate device (ABP).
pub const LORAWAN_MSG_ACTIVATE_DEVICE_REQ: u8 = 0x01;
/// Activate device response.
pub const LORAWAN_MSG_ACTIVATE_DEVICE_RSP: u8 = 0x02;
/// Set OTAA join parameters.
pub const LORAWAN_MSG_SET_JOIN_PARAM_REQ: u8 = 0x05;
/// Set join parameters response.
pub const LORAWAN_MSG_SET_JOIN_PARAM_RSP: u8 = 0x06;
/// Start the OTAA join procedure.
pub const LORAWAN_MSG_JOIN_NETWORK_REQ: u8 = 0x09;
/// Join network response.
pub const LORAWAN_MSG_JOIN_NETWORK_RSP: u8 = 0x0A;
/// Join request radio packet was transmitted.
pub const LORAWAN_MSG_JOIN_TRANSMIT_IND: u8 = 0x0B;
/// Join procedure finished (accept or timeout).
pub const LORAWAN_MSG_JOIN_NETWORK_IND: u8 = 0x0C;
/// Send unconfirmed uplink data.
pub const LORAWAN_MSG_SEND_UDATA_REQ: u8 = 0x0D;
/// Send unconfirmed data response.
pub const LORAWAN_MSG_SEND_UDATA_RSP: u8 = 0x0E;
/// Unconfirmed uplink transmitted.
pub const LORAWAN_MSG_SEND_UDATA_IND: u8 = 0x0F;
/// Unconfirmed downlink received.
pub const LORAWAN_MSG_RECV_UDATA_IND: u8 = 0x10;
/// Send confirmed uplink data.
pub const LORAWAN_MSG_SEND_CDATA_REQ: u8 = 0x11;
/// Send confirmed data response.
pub const LORAWAN_MSG_SEND_CDATA_RSP: u8 = 0x12;
/// Confirmed uplink transmitted.
pub const LORAWAN_MSG_SEND_CDATA_IND: u8 = 0x13;
/// Confirmed downlink received.
pub const LORAWAN_MSG_RECV_CDATA_IND: u8 = 0x14;
/// No downlink data received in the receive windows.
pub const LORAWAN_MSG_RECV_NODATA_IND: u8 = 0x16;
/// Set radio stack configuration.
pub const LORAWAN_MSG_SET_RSTACK_CONFIG_REQ: u8 = 0x19;
/// Set radio stack configuration response.
pub const LORAWAN_MSG_SET_RSTACK_CONFIG_RSP: u8 = 0x1A;
/// Get radio stack configuration.
pub const LORAWAN_MSG_GET_RSTACK_CONFIG_REQ: u8 = 0x1B;
/// Get radio stack configuration response.
pub const LORAWAN_MSG_GET_RSTACK_CONFIG_RSP: u8 = 0x1C;
/// Reactivate a previously activated device.
pub const LORAWAN_MSG_REACTIVATE_DEVICE_REQ: u8 = 0x1D;
/// Reactivate device response.
pub const LORAWAN_MSG_REACTIVATE_DEVICE_RSP: u8 = 0x1E;
/// Deactivate the device.
pub const LORAWAN_MSG_DEACTIVATE_DEVICE_REQ: u8 = 0x21;
/// Deactivate device response.
pub const LORAWAN_MSG_DEACTIVATE_DEVICE_RSP: u8 = 0x22;
/// Restore factory settings.
pub const LORAWAN_MSG_FACTORY_RESET_REQ: u8 = 0x23;
/// Factory reset response.
pub const LORAWAN_MSG_FACTORY_RESET_RSP: u8 = 0x24;
/// Set the device EUI.
pub const LORAWAN_MSG_SET_DEVICE_EUI_REQ: u8 = 0x25;
/// Set device EUI response.
pub const LORAWAN_MSG_SET_DEVICE_EUI_RSP: u8 = 0x26;
/// Get the device EUI.
pub const LORAWAN_MSG_GET_DEVICE_EUI_REQ: u8 = 0x27;
/// Get device EUI response.
pub const LORAWAN_MSG_GET_DEVICE_EUI_RSP: u8 = 0x28;
/// Get network status.
pub const LORAWAN_MSG_GET_NWK_STATUS_REQ: u8 = 0x29;
/// Get network status response.
pub const LORAWAN_MSG_GET_NWK_STATUS_RSP: u8 = 0x2A;
/// Send a MAC command.
pub const LORAWAN_MSG_SEND_MAC_CMD_REQ: u8 = 0x2B;
/// Send MAC command response.
pub const LORAWAN_MSG_SEND_MAC_CMD_RSP: u8 = 0x2C;
/// MAC command received.
pub const LORAWAN_MSG_RECV_MAC_CMD_IND: u8 = 0x2D;
/// Set custom configuration (RF gain).
pub const LORAWAN_MSG_SET_CUSTOM_CFG_REQ: u8 = 0x31;
/// Set custom configuration response.
pub const LORAWAN_MSG_SET_CUSTOM_CFG_RSP: u8 = 0x32;
/// Get custom configuration.
pub const LORAWAN_MSG_GET_CUSTOM_CFG_REQ: u8 = 0x33;
/// Get custom configuration response.
pub const LORAWAN_MSG_GET_CUSTOM_CFG_RSP: u8 = 0x34;
/// Get the list of supported bands.
pub const LORAWAN_MSG_GET_SUPPORTED_BANDS_REQ: u8 = 0x35;
/// Supported bands response.
pub const LORAWAN_MSG_GET_SUPPORTED_BANDS_RSP: u8 = 0x36;
/// Set the LinkADRReq handling option.
pub const LORAWAN_MSG_SET_LINKADRREQ_CONFIG_REQ: u8 = 0x3B;
/// Set LinkADRReq option response.
pub const LORAWAN_MSG_SET_LINKADRREQ_CONFIG_RSP: u8 = 0x3C;
/// Get the LinkADRReq handling option.
pub const LORAWAN_MSG_GET_LINKADRREQ_CONFIG_REQ: u8 = 0x3D;
/// Get LinkADRReq option response.
pub const LORAWAN_MSG_GET_LINKADRREQ_CONFIG_RSP: u8 = 0x3E;
/// Set the battery level reported in DevStatusAns.
pub const LORAWAN_MSG_SET_BATTERY_LEVEL_REQ: u8 = 0x3F;
/// Set battery level response.
pub const LORAWAN_MSG_SET_BATTERY_LEVEL_RSP: u8 = 0x40;

// ============================================================================
// Status Codes
// ============================================================================

/// Device Management: ok.
pub const DEVMGMT_STATUS_OK: u8 = 0x00;
/// Device Management: generic error.
pub const DEVMGMT_STATUS_ERROR: u8 = 0x01;
/// Device Management: command not supported.
pub const DEVMGMT_STATUS_CMD_NOT_SUPPORTED: u8 = 0x02;
/// Device Management: wrong parameter.
pub const DEVMGMT_STATUS_WRONG_PARAMETER: u8 = 0x03;
/// Device Management: wrong device mode.
pub const DEVMGMT_STATUS_WRONG_DEVICE_MODE: u8 = 0x04;

/// LoRaWAN: ok.
pub const LORAWAN_STATUS_OK: u8 = 0x00;
/// LoRaWAN: generic error.
pub const LORAWAN_STATUS_ERROR: u8 = 0x01;
/// LoRaWAN: command not supported.
pub const LORAWAN_STATUS_CMD_NOT_SUPPORTED: u8 = 0x02;
/// LoRaWAN: wrong parameter.
pub const LORAWAN_STATUS_WRONG_PARAMETER: u8 = 0x03;
/// LoRaWAN: wrong device mode.
pub const LORAWAN_STATUS_WRONG_DEVICE_MODE: u8 = 0x04;
/// LoRaWAN: device not activated.
pub const LORAWAN_STATUS_DEVICE_NOT_ACTIVATED: u8 = 0x05;
/// LoRaWAN: device busy.
pub const LORAWAN_STATUS_DEVICE_BUSY: u8 = 0x06;
/// LoRaWAN: message queue full.
pub const LORAWAN_STATUS_QUEUE_FULL: u8 = 0x07;
/// LoRaWAN: HCI message length error.
pub const LORAWAN_STATUS_LENGTH_ERROR: u8 = 0x08;
/// LoRaWAN: no factory settings available.
pub const LORAWAN_STATUS_NO_FACTORY_SETTINGS: u8 = 0x09;
/// LoRaWAN: channel blocked by duty cycle.
pub const LORAWAN_STATUS_CHANNEL_BLOCKED_BY_DC: u8 = 0x0A;
/// LoRaWAN: channel not available.
pub const LORAWAN_STATUS_CHANNEL_NOT_AVAILABLE: u8 = 0x0B;

// ============================================================================
// Operation Modes
// ============================================================================

/// Standard application mode.
pub const OPMODE_STANDARD: u8 = 0x00;
/// Reserved operation mode accepted by the set-opmode request.
pub const OPMODE_RESERVED: u8 = 0x01;

// ============================================================================
// RTC Alarm Modes
// ============================================================================

/// Alarm fires once.
pub const RTC_ALARM_SINGLE: u8 = 0x00;
/// Alarm repeats every day.
pub const RTC_ALARM_DAILY: u8 = 0x01;

// ============================================================================
// Indication Flags
// ============================================================================

/// Channel info block attached to the indication.
pub const IND_FLAG_CHANNEL_INFO: u8 = 0x01;
/// Uplink was acknowledged.
pub const IND_FLAG_ACK: u8 = 0x02;
/// Network server has more downlink data pending.
pub const IND_FLAG_FRAME_PENDING: u8 = 0x04;

/// TX indication: maximum number of retransmissions reached.
pub const TX_IND_RETRANSMISSIONS_EXHAUSTED: u8 = 0x02;
/// TX indication: payload too large for the current data rate.
pub const TX_IND_PAYLOAD_TOO_LARGE: u8 = 0x04;

// ============================================================================
// Radio Stack Options
// ============================================================================

/// Adaptive data rate enabled.
pub const RSTACK_OPT_ADR: u8 = 0x01;
/// Duty cycle control enabled.
pub const RSTACK_OPT_DUTY_CYCLE: u8 = 0x02;
/// Class C selected (class A otherwise).
pub const RSTACK_OPT_CLASS_C: u8 = 0x04;
/// Extended RF packet output format (channel info attached).
pub const RSTACK_OPT_EXTENDED_FORMAT: u8 = 0x40;
/// Rx MAC command forwarding enabled.
pub const RSTACK_OPT_MAC_FORWARDING: u8 = 0x80;

/// Set radio stack error: wrong data rate.
pub const RSTACK_ERR_DATA_RATE: u8 = 0x01;
/// Set radio stack error: wrong TX power level.
pub const RSTACK_ERR_TX_POWER: u8 = 0x02;
/// Set radio stack error: wrong band index.
pub const RSTACK_ERR_BAND_INDEX: u8 = 0x20;

// ============================================================================
// Sizes
// ============================================================================

/// Default HCI payload capacity of the module.
pub const DEFAULT_PAYLOAD_CAPACITY: usize = 300;
/// Size of an ABP activation payload.
pub const ACTIVATE_DEVICE_LEN: usize = 36;
/// Size of the OTAA join parameter payload.
pub const JOIN_PARAM_LEN: usize = 24;
/// Size of a radio stack configuration payload.
pub const RSTACK_CONFIG_LEN: usize = 7;
/// Size of an EUI-64.
pub const EUI_LEN: usize = 8;
/// Size of an AES-128 key.
pub const KEY_LEN: usize = 16;
/// Size of the RX channel info trailer.
pub const RX_CHANNEL_INFO_LEN: usize = 5;
/// Size of the firmware build date field.
pub const BUILD_DATE_LEN: usize = 10;
/// Minimum size of a device status response.
pub const DEVICE_STATUS_LEN: usize = 60;
