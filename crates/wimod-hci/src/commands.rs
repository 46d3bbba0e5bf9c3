//! Requests that can be sent to the module.
//!
//! Every request kind has one length rule. [`encode`] checks the caller's
//! argument bytes against that rule and builds a fresh [`Envelope`]; the
//! typed [`Request`] enums produce the argument bytes and route through it.

use bytes::BytesMut;

use crate::config::HciConfig;
use crate::constants::*;
use crate::envelope::Envelope;
use crate::error::{HciError, HciResult};
use crate::rtc::RtcTime;
use crate::types::*;

// ============================================================================
// Length Rules
// ============================================================================

/// Payload length rule of a request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// Exactly this many bytes.
    Fixed(usize),
    /// One port byte followed by the application payload.
    PortAndData,
    /// Raw MAC command bytes.
    MacCommand,
}

/// Length rule for a request kind, `None` if the kind cannot be sent.
pub fn length_rule(endpoint: Endpoint, kind: u8) -> Option<LengthRule> {
    match endpoint {
        Endpoint::DevMgmt => devmgmt_length_rule(kind),
        Endpoint::LoRaWan => lorawan_length_rule(kind),
    }
}

fn devmgmt_length_rule(kind: u8) -> Option<LengthRule> {
    let len = match kind {
        DEVMGMT_MSG_PING_REQ
        | DEVMGMT_MSG_GET_DEVICE_INFO_REQ
        | DEVMGMT_MSG_RESET_REQ
        | DEVMGMT_MSG_GET_FW_VERSION_REQ
        | DEVMGMT_MSG_GET_DEVICE_STATUS_REQ
        | DEVMGMT_MSG_GET_RTC_REQ
        | DEVMGMT_MSG_GET_RTC_ALARM_REQ
        | DEVMGMT_MSG_CLEAR_RTC_ALARM_REQ
        | DEVMGMT_MSG_GET_OPMODE_REQ => 0,
        DEVMGMT_MSG_SET_RTC_REQ | DEVMGMT_MSG_SET_RTC_ALARM_REQ => 4,
        DEVMGMT_MSG_SET_OPMODE_REQ => 1,
        _ => return None,
    };
    Some(LengthRule::Fixed(len))
}

fn lorawan_length_rule(kind: u8) -> Option<LengthRule> {
    let len = match kind {
        LORAWAN_MSG_REACTIVATE_DEVICE_REQ
        | LORAWAN_MSG_JOIN_NETWORK_REQ
        | LORAWAN_MSG_GET_RSTACK_CONFIG_REQ
        | LORAWAN_MSG_GET_SUPPORTED_BANDS_REQ
        | LORAWAN_MSG_GET_DEVICE_EUI_REQ
        | LORAWAN_MSG_GET_CUSTOM_CFG_REQ
        | LORAWAN_MSG_GET_LINKADRREQ_CONFIG_REQ
        | LORAWAN_MSG_FACTORY_RESET_REQ
        | LORAWAN_MSG_DEACTIVATE_DEVICE_REQ
        | LORAWAN_MSG_GET_NWK_STATUS_REQ => 0,
        LORAWAN_MSG_SET_CUSTOM_CFG_REQ
        | LORAWAN_MSG_SET_LINKADRREQ_CONFIG_REQ
        | LORAWAN_MSG_SET_BATTERY_LEVEL_REQ => 1,
        LORAWAN_MSG_ACTIVATE_DEVICE_REQ => ACTIVATE_DEVICE_LEN,
        LORAWAN_MSG_SET_JOIN_PARAM_REQ => JOIN_PARAM_LEN,
        LORAWAN_MSG_SET_RSTACK_CONFIG_REQ => RSTACK_CONFIG_LEN,
        LORAWAN_MSG_SET_DEVICE_EUI_REQ => EUI_LEN,
        LORAWAN_MSG_SEND_UDATA_REQ | LORAWAN_MSG_SEND_CDATA_REQ => {
            return Some(LengthRule::PortAndData)
        }
        LORAWAN_MSG_SEND_MAC_CMD_REQ => return Some(LengthRule::MacCommand),
        _ => return None,
    };
    Some(LengthRule::Fixed(len))
}

// ============================================================================
// Generic Encoder
// ============================================================================

/// Encode a request from raw argument bytes.
///
/// Fails with `UnsupportedKind` for kinds without a length rule,
/// `LengthMismatch` when `args` violates the rule and `Overflow` when the
/// result would not fit in the configured payload capacity. No envelope is
/// produced on failure.
pub fn encode(endpoint: Endpoint, kind: u8, args: &[u8], config: &HciConfig) -> HciResult<Envelope> {
    let rule = length_rule(endpoint, kind).ok_or(HciError::UnsupportedKind { endpoint, kind })?;
    let capacity = config.payload_capacity;

    if endpoint == Endpoint::DevMgmt && kind == DEVMGMT_MSG_SET_OPMODE_REQ {
        if let Some(&mode) = args.first() {
            if mode > OPMODE_RESERVED {
                return Err(HciError::InvalidArgument(format!(
                    "operation mode must be 0 or 1, got {}",
                    mode
                )));
            }
        }
    }

    let payload = match rule {
        LengthRule::Fixed(len) => {
            if args.len() != len {
                return Err(HciError::LengthMismatch {
                    kind,
                    expected: len,
                    actual: args.len(),
                });
            }
            let mut payload = BytesMut::zeroed(len);
            payload.copy_from_slice(args);
            payload
        }
        LengthRule::PortAndData => {
            if args.is_empty() {
                return Err(HciError::LengthMismatch {
                    kind,
                    expected: 1,
                    actual: 0,
                });
            }
            BytesMut::from(args)
        }
        LengthRule::MacCommand => BytesMut::from(args),
    };

    let envelope = Envelope::new(endpoint, kind, payload.freeze(), capacity)?;
    log::debug!(
        "encoded {} request 0x{:02X} ({} bytes)",
        endpoint,
        kind,
        envelope.len()
    );
    log::trace!("tx frame: {:02X?}", envelope.to_wire());
    Ok(envelope)
}

/// Message kind of the response answering `request_kind`.
pub fn response_kind(request_kind: u8) -> u8 {
    request_kind.wrapping_add(1)
}

// ============================================================================
// Typed Requests
// ============================================================================

/// Device Management requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevMgmtRequest {
    /// Ping the module.
    Ping,
    /// Get module type, address and id.
    GetDeviceInfo,
    /// Get firmware version.
    GetFirmwareVersion,
    /// Reset the module.
    Reset,
    /// Get device status counters.
    GetDeviceStatus,
    /// Get the RTC.
    GetRtc,
    /// Set the RTC.
    SetRtc(RtcTime),
    /// Get the RTC alarm.
    GetRtcAlarm,
    /// Set the RTC alarm.
    SetRtcAlarm(RtcAlarm),
    /// Clear the RTC alarm.
    ClearRtcAlarm,
    /// Get the operation mode.
    GetOpMode,
    /// Set the operation mode (0 or 1).
    SetOpMode(u8),
}

impl DevMgmtRequest {
    /// Message identifier.
    pub fn kind(&self) -> u8 {
        match self {
            DevMgmtRequest::Ping => DEVMGMT_MSG_PING_REQ,
            DevMgmtRequest::GetDeviceInfo => DEVMGMT_MSG_GET_DEVICE_INFO_REQ,
            DevMgmtRequest::GetFirmwareVersion => DEVMGMT_MSG_GET_FW_VERSION_REQ,
            DevMgmtRequest::Reset => DEVMGMT_MSG_RESET_REQ,
            DevMgmtRequest::GetDeviceStatus => DEVMGMT_MSG_GET_DEVICE_STATUS_REQ,
            DevMgmtRequest::GetRtc => DEVMGMT_MSG_GET_RTC_REQ,
            DevMgmtRequest::SetRtc(_) => DEVMGMT_MSG_SET_RTC_REQ,
            DevMgmtRequest::GetRtcAlarm => DEVMGMT_MSG_GET_RTC_ALARM_REQ,
            DevMgmtRequest::SetRtcAlarm(_) => DEVMGMT_MSG_SET_RTC_ALARM_REQ,
            DevMgmtRequest::ClearRtcAlarm => DEVMGMT_MSG_CLEAR_RTC_ALARM_REQ,
            DevMgmtRequest::GetOpMode => DEVMGMT_MSG_GET_OPMODE_REQ,
            DevMgmtRequest::SetOpMode(_) => DEVMGMT_MSG_SET_OPMODE_REQ,
        }
    }

    /// Argument bytes.
    pub fn args(&self) -> HciResult<Vec<u8>> {
        Ok(match self {
            DevMgmtRequest::SetRtc(time) => time.to_bytes()?.to_vec(),
            DevMgmtRequest::SetRtcAlarm(alarm) => alarm.to_bytes()?.to_vec(),
            DevMgmtRequest::SetOpMode(mode) => vec![*mode],
            _ => Vec::new(),
        })
    }
}

/// LoRaWAN requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoRaWanRequest {
    /// Activate by personalization.
    ActivateDevice(AbpActivation),
    /// Reactivate with the stored parameters.
    Reactivate,
    /// Deactivate.
    Deactivate,
    /// Set OTAA join parameters.
    SetJoinParameters(JoinParameters),
    /// Start the OTAA join.
    JoinNetwork,
    /// Send unconfirmed uplink data.
    SendUnconfirmedData {
        /// LoRaWAN port.
        port: u8,
        /// Application payload.
        payload: Vec<u8>,
    },
    /// Send confirmed uplink data.
    SendConfirmedData {
        /// LoRaWAN port.
        port: u8,
        /// Application payload.
        payload: Vec<u8>,
    },
    /// Send MAC commands.
    SendMacCommand {
        /// Raw MAC command bytes.
        payload: Vec<u8>,
    },
    /// Set radio stack configuration.
    SetRadioStackConfig(RadioStackConfig),
    /// Get radio stack configuration.
    GetRadioStackConfig,
    /// Get supported bands.
    GetSupportedBands,
    /// Get device EUI.
    GetDeviceEui,
    /// Set device EUI.
    SetDeviceEui([u8; EUI_LEN]),
    /// Get custom configuration.
    GetCustomConfig,
    /// Set custom configuration.
    SetCustomConfig {
        /// RF gain in dBd.
        rf_gain_dbd: i8,
    },
    /// Get the LinkADRReq option.
    GetLinkAdrConfig,
    /// Set the LinkADRReq option.
    SetLinkAdrConfig(LinkAdrOption),
    /// Set the battery level reported to the network.
    SetBatteryLevel(u8),
    /// Restore factory settings.
    FactoryReset,
    /// Get network status.
    GetNetworkStatus,
}

impl LoRaWanRequest {
    /// Message identifier.
    pub fn kind(&self) -> u8 {
        match self {
            LoRaWanRequest::ActivateDevice(_) => LORAWAN_MSG_ACTIVATE_DEVICE_REQ,
            LoRaWanRequest::Reactivate => LORAWAN_MSG_REACTIVATE_DEVICE_REQ,
            LoRaWanRequest::Deactivate => LORAWAN_MSG_DEACTIVATE_DEVICE_REQ,
            LoRaWanRequest::SetJoinParameters(_) => LORAWAN_MSG_SET_JOIN_PARAM_REQ,
            LoRaWanRequest::JoinNetwork => LORAWAN_MSG_JOIN_NETWORK_REQ,
            LoRaWanRequest::SendUnconfirmedData { .. } => LORAWAN_MSG_SEND_UDATA_REQ,
            LoRaWanRequest::SendConfirmedData { .. } => LORAWAN_MSG_SEND_CDATA_REQ,
            LoRaWanRequest::SendMacCommand { .. } => LORAWAN_MSG_SEND_MAC_CMD_REQ,
            LoRaWanRequest::SetRadioStackConfig(_) => LORAWAN_MSG_SET_RSTACK_CONFIG_REQ,
            LoRaWanRequest::GetRadioStackConfig => LORAWAN_MSG_GET_RSTACK_CONFIG_REQ,
            LoRaWanRequest::GetSupportedBands => LORAWAN_MSG_GET_SUPPORTED_BANDS_REQ,
            LoRaWanRequest::GetDeviceEui => LORAWAN_MSG_GET_DEVICE_EUI_REQ,
            LoRaWanRequest::SetDeviceEui(_) => LORAWAN_MSG_SET_DEVICE_EUI_REQ,
            LoRaWanRequest::GetCustomConfig => LORAWAN_MSG_GET_CUSTOM_CFG_REQ,
            LoRaWanRequest::SetCustomConfig { .. } => LORAWAN_MSG_SET_CUSTOM_CFG_REQ,
            LoRaWanRequest::GetLinkAdrConfig => LORAWAN_MSG_GET_LINKADRREQ_CONFIG_REQ,
            LoRaWanRequest::SetLinkAdrConfig(_) => LORAWAN_MSG_SET_LINKADRREQ_CONFIG_REQ,
            LoRaWanRequest::SetBatteryLevel(_) => LORAWAN_MSG_SET_BATTERY_LEVEL_REQ,
            LoRaWanRequest::FactoryReset => LORAWAN_MSG_FACTORY_RESET_REQ,
            LoRaWanRequest::GetNetworkStatus => LORAWAN_MSG_GET_NWK_STATUS_REQ,
        }
    }

    /// Argument bytes.
    pub fn args(&self) -> Vec<u8> {
        match self {
            LoRaWanRequest::ActivateDevice(activation) => activation.to_bytes(),
            LoRaWanRequest::SetJoinParameters(params) => params.to_bytes(),
            LoRaWanRequest::SendUnconfirmedData { port, payload }
            | LoRaWanRequest::SendConfirmedData { port, payload } => {
                let mut buf = Vec::with_capacity(1 + payload.len());
                buf.push(*port);
                buf.extend_from_slice(payload);
                buf
            }
            LoRaWanRequest::SendMacCommand { payload } => payload.clone(),
            LoRaWanRequest::SetRadioStackConfig(config) => config.to_bytes().to_vec(),
            LoRaWanRequest::SetDeviceEui(eui) => eui.to_vec(),
            LoRaWanRequest::SetCustomConfig { rf_gain_dbd } => vec![*rf_gain_dbd as u8],
            LoRaWanRequest::SetLinkAdrConfig(option) => vec![u8::from(*option)],
            LoRaWanRequest::SetBatteryLevel(level) => vec![*level],
            _ => Vec::new(),
        }
    }
}

/// A request to either endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Device Management request.
    DevMgmt(DevMgmtRequest),
    /// LoRaWAN request.
    LoRaWan(LoRaWanRequest),
}

impl Request {
    /// Endpoint the request is addressed to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Request::DevMgmt(_) => Endpoint::DevMgmt,
            Request::LoRaWan(_) => Endpoint::LoRaWan,
        }
    }

    /// Message identifier.
    pub fn kind(&self) -> u8 {
        match self {
            Request::DevMgmt(req) => req.kind(),
            Request::LoRaWan(req) => req.kind(),
        }
    }

    /// Encode into a fresh envelope.
    pub fn encode(&self, config: &HciConfig) -> HciResult<Envelope> {
        let args = match self {
            Request::DevMgmt(req) => req.args()?,
            Request::LoRaWan(req) => req.args(),
        };
        encode(self.endpoint(), self.kind(), &args, config)
    }
}

impl From<DevMgmtRequest> for Request {
    fn from(req: DevMgmtRequest) -> Self {
        Request::DevMgmt(req)
    }
}

impl From<LoRaWanRequest> for Request {
    fn from(req: LoRaWanRequest) -> Self {
        Request::LoRaWan(req)
    }
}
