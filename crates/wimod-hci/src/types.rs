//! Common types used in the protocol.

use std::fmt;

use crate::constants::*;
use crate::error::{HciError, HciResult};

// ============================================================================
// Endpoint
// ============================================================================

/// Service access point an HCI message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Device Management (SAP 0x01).
    DevMgmt,
    /// LoRaWAN control (SAP 0x10).
    LoRaWan,
}

impl Endpoint {
    /// The SAP identifier carried on the wire.
    pub fn sap_id(self) -> u8 {
        match self {
            Endpoint::DevMgmt => DEVMGMT_SAP_ID,
            Endpoint::LoRaWan => LORAWAN_SAP_ID,
        }
    }
}

impl TryFrom<u8> for Endpoint {
    type Error = HciError;

    fn try_from(sap_id: u8) -> HciResult<Self> {
        match sap_id {
            DEVMGMT_SAP_ID => Ok(Endpoint::DevMgmt),
            LORAWAN_SAP_ID => Ok(Endpoint::LoRaWan),
            other => Err(HciError::UnknownEndpoint(other)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::DevMgmt => write!(f, "DevMgmt"),
            Endpoint::LoRaWan => write!(f, "LoRaWAN"),
        }
    }
}

// ============================================================================
// Status
// ============================================================================

/// Status byte at offset 0 of every response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Raw status code.
    pub code: u8,
    /// Text from the endpoint's status table, `None` for unlisted codes.
    pub label: Option<&'static str>,
}

impl Status {
    /// Resolve a status code against the endpoint's status table.
    pub fn new(endpoint: Endpoint, code: u8) -> Self {
        Status {
            code,
            label: crate::status::status_label(endpoint, code),
        }
    }

    /// Whether the module reported success.
    pub fn is_ok(&self) -> bool {
        // Both endpoints use 0x00 for ok.
        self.code == DEVMGMT_STATUS_OK
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "unknown status (0x{:02X})", self.code),
        }
    }
}

// ============================================================================
// Device Management Records
// ============================================================================

/// Module identity returned by get-device-info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Module type code.
    pub module_type: u8,
    /// Device address.
    pub device_address: u32,
    /// Device identifier.
    pub device_id: u32,
}

impl DeviceInfo {
    /// Human readable module name, if the type is known.
    pub fn module_name(&self) -> Option<&'static str> {
        crate::status::module_type_label(self.module_type)
    }
}

/// Firmware information returned by get-firmware-version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
    /// Build count.
    pub build: u16,
    /// Build date as sent by the module (10 characters).
    pub build_date: String,
    /// Firmware content description, may be empty.
    pub content: String,
}

/// Operation mode of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Standard application mode.
    Standard,
    /// Any other mode value.
    Other(u8),
}

impl From<u8> for OpMode {
    fn from(mode: u8) -> Self {
        match mode {
            OPMODE_STANDARD => OpMode::Standard,
            other => OpMode::Other(other),
        }
    }
}

/// Repeat mode of the RTC alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmMode {
    /// Fire once.
    Single,
    /// Fire every day.
    Daily,
}

/// RTC alarm time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcAlarm {
    /// Repeat mode.
    pub mode: AlarmMode,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-59).
    pub second: u8,
}

impl RtcAlarm {
    /// Encode as the 4-byte set-RTC-alarm argument.
    pub fn to_bytes(&self) -> HciResult<[u8; 4]> {
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return Err(HciError::InvalidArgument(format!(
                "alarm time out of range: {:02}:{:02}:{:02}",
                self.hour, self.minute, self.second
            )));
        }
        let mode = match self.mode {
            AlarmMode::Single => RTC_ALARM_SINGLE,
            AlarmMode::Daily => RTC_ALARM_DAILY,
        };
        Ok([mode, self.hour, self.minute, self.second])
    }
}

/// RTC alarm state returned by get-RTC-alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcAlarmStatus {
    /// Whether an alarm is armed.
    pub alarm_set: bool,
    /// Whether the alarm repeats daily.
    pub daily: bool,
    /// Hour.
    pub hour: u8,
    /// Minute.
    pub minute: u8,
    /// Second.
    pub second: u8,
}

/// Counters returned by get-device-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceStatus {
    /// System tick resolution in milliseconds.
    pub tick_resolution: u8,
    /// System tick counter.
    pub system_tick: u32,
    /// Target time (RTC).
    pub target_time: crate::rtc::RtcTime,
    /// NVM status bits.
    pub nvm_status: u16,
    /// Supply voltage in millivolts.
    pub battery_mv: u16,
    /// Unconfirmed uplinks transmitted.
    pub tx_unconfirmed: u32,
    /// Confirmed uplinks transmitted.
    pub tx_confirmed: u32,
    /// Uplinks that failed.
    pub tx_error: u32,
    /// Unconfirmed downlinks in RX1.
    pub rx1_unconfirmed: u32,
    /// Confirmed downlinks in RX1.
    pub rx1_confirmed: u32,
    /// MIC errors in RX1.
    pub rx1_mic_error: u32,
    /// Unconfirmed downlinks in RX2.
    pub rx2_unconfirmed: u32,
    /// Confirmed downlinks in RX2.
    pub rx2_confirmed: u32,
    /// MIC errors in RX2.
    pub rx2_mic_error: u32,
    /// Join requests transmitted.
    pub tx_join: u32,
    /// Join accepts received.
    pub rx_accept: u32,
}

// ============================================================================
// LoRaWAN Records
// ============================================================================

/// ABP activation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbpActivation {
    /// Device address.
    pub device_address: u32,
    /// Network session key.
    pub network_session_key: [u8; KEY_LEN],
    /// Application session key.
    pub app_session_key: [u8; KEY_LEN],
}

impl AbpActivation {
    /// Encode as the 36-byte activate-device argument.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ACTIVATE_DEVICE_LEN);
        buf.extend_from_slice(&self.device_address.to_le_bytes());
        buf.extend_from_slice(&self.network_session_key);
        buf.extend_from_slice(&self.app_session_key);
        buf
    }
}

/// OTAA join parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinParameters {
    /// Application EUI.
    pub app_eui: [u8; EUI_LEN],
    /// Application key.
    pub app_key: [u8; KEY_LEN],
}

impl JoinParameters {
    /// Encode as the 24-byte set-join-parameters argument.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(JOIN_PARAM_LEN);
        buf.extend_from_slice(&self.app_eui);
        buf.extend_from_slice(&self.app_key);
        buf
    }
}

/// LoRaWAN radio stack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioStackConfig {
    /// Default data rate index.
    pub data_rate: u8,
    /// Default TX power level (EIRP, dBm).
    pub tx_power: u8,
    /// Option bits, see the `RSTACK_OPT_*` constants.
    pub options: u8,
    /// Power saving mode: 0 off, 1 automatic.
    pub power_saving: u8,
    /// Maximum number of retransmissions.
    pub retransmissions: u8,
    /// Band index.
    pub band_index: u8,
    /// Header MAC command capacity.
    pub header_mac_capacity: u8,
}

impl RadioStackConfig {
    /// Encode as the 7-byte configuration block.
    pub fn to_bytes(&self) -> [u8; RSTACK_CONFIG_LEN] {
        [
            self.data_rate,
            self.tx_power,
            self.options,
            self.power_saving,
            self.retransmissions,
            self.band_index,
            self.header_mac_capacity,
        ]
    }

    /// Decode from a 7-byte configuration block.
    pub fn from_bytes(bytes: &[u8; RSTACK_CONFIG_LEN]) -> Self {
        RadioStackConfig {
            data_rate: bytes[0],
            tx_power: bytes[1],
            options: bytes[2],
            power_saving: bytes[3],
            retransmissions: bytes[4],
            band_index: bytes[5],
            header_mac_capacity: bytes[6],
        }
    }

    /// Adaptive data rate enabled.
    pub fn adaptive_data_rate(&self) -> bool {
        self.options & RSTACK_OPT_ADR != 0
    }

    /// Duty cycle control enabled.
    pub fn duty_cycle_control(&self) -> bool {
        self.options & RSTACK_OPT_DUTY_CYCLE != 0
    }

    /// Class C operation (class A otherwise).
    pub fn class_c(&self) -> bool {
        self.options & RSTACK_OPT_CLASS_C != 0
    }

    /// Extended RF packet output format.
    pub fn extended_format(&self) -> bool {
        self.options & RSTACK_OPT_EXTENDED_FORMAT != 0
    }

    /// Rx MAC command forwarding.
    pub fn mac_forwarding(&self) -> bool {
        self.options & RSTACK_OPT_MAC_FORWARDING != 0
    }
}

/// Parameters rejected by set-radio-stack-config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioStackErrors(pub u8);

impl RadioStackErrors {
    /// Data rate was rejected.
    pub fn wrong_data_rate(&self) -> bool {
        self.0 & RSTACK_ERR_DATA_RATE != 0
    }

    /// TX power level was rejected.
    pub fn wrong_tx_power(&self) -> bool {
        self.0 & RSTACK_ERR_TX_POWER != 0
    }

    /// Band index was rejected.
    pub fn wrong_band_index(&self) -> bool {
        self.0 & RSTACK_ERR_BAND_INDEX != 0
    }
}

/// One entry of the supported bands list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedBand {
    /// Band index.
    pub band_index: u8,
    /// Maximum EIRP in dBm.
    pub max_eirp: u8,
}

/// LinkADRReq handling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAdrOption {
    /// LoRaWAN v1.0.2 behaviour.
    LoRaWan102,
    /// Semtech proposal.
    Semtech,
    /// KPN/Actility proposal.
    KpnActility,
    /// Unknown option value.
    Unknown(u8),
}

impl From<u8> for LinkAdrOption {
    fn from(value: u8) -> Self {
        match value {
            0 => LinkAdrOption::LoRaWan102,
            1 => LinkAdrOption::Semtech,
            2 => LinkAdrOption::KpnActility,
            other => LinkAdrOption::Unknown(other),
        }
    }
}

impl From<LinkAdrOption> for u8 {
    fn from(option: LinkAdrOption) -> Self {
        match option {
            LinkAdrOption::LoRaWan102 => 0,
            LinkAdrOption::Semtech => 1,
            LinkAdrOption::KpnActility => 2,
            LinkAdrOption::Unknown(other) => other,
        }
    }
}

/// Network activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Not activated.
    Inactive,
    /// Activated by personalization.
    ActiveAbp,
    /// Activated over the air.
    ActiveOtaa,
    /// OTAA join in progress.
    Joining,
    /// State code this crate does not know.
    Other(u8),
}

impl From<u8> for NetworkState {
    fn from(state: u8) -> Self {
        match state {
            0 => NetworkState::Inactive,
            1 => NetworkState::ActiveAbp,
            2 => NetworkState::ActiveOtaa,
            3 => NetworkState::Joining,
            other => NetworkState::Other(other),
        }
    }
}

/// Link parameters reported while active or joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLink {
    /// Device address.
    pub device_address: u32,
    /// Current data rate index.
    pub data_rate: u8,
    /// Current TX power level.
    pub tx_power: u8,
    /// Maximum application payload size.
    pub max_payload: u8,
}

/// Network status returned by get-network-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    /// Activation state.
    pub state: NetworkState,
    /// Link parameters, present when active or joining.
    pub link: Option<NetworkLink>,
}

// ============================================================================
// Indication Records
// ============================================================================

/// Flag byte at offset 0 of receive indications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxFlags(pub u8);

impl RxFlags {
    /// A 5-byte channel info trailer is attached.
    pub fn channel_info_attached(&self) -> bool {
        self.0 & IND_FLAG_CHANNEL_INFO != 0
    }

    /// The previous confirmed uplink was acknowledged.
    pub fn acknowledged(&self) -> bool {
        self.0 & IND_FLAG_ACK != 0
    }

    /// The network has more downlink data pending.
    pub fn frame_pending(&self) -> bool {
        self.0 & IND_FLAG_FRAME_PENDING != 0
    }
}

/// Radio parameters of a received downlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxChannelInfo {
    /// Channel index.
    pub channel_index: u8,
    /// Data rate index.
    pub data_rate: u8,
    /// RSSI in dBm.
    pub rssi: i8,
    /// SNR in dB.
    pub snr: i8,
    /// Receive window slot.
    pub rx_slot: u8,
}

impl RxChannelInfo {
    /// Decode from the 5-byte trailer.
    pub fn from_bytes(bytes: &[u8; RX_CHANNEL_INFO_LEN]) -> Self {
        RxChannelInfo {
            channel_index: bytes[0],
            data_rate: bytes[1],
            rssi: bytes[2] as i8,
            snr: bytes[3] as i8,
            rx_slot: bytes[4],
        }
    }
}

/// Radio parameters of a transmitted uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxChannelInfo {
    /// Channel index.
    pub channel_index: u8,
    /// Data rate index.
    pub data_rate: u8,
    /// Number of transmissions.
    pub transmissions: u8,
    /// TX power in dBm.
    pub tx_power_dbm: u8,
    /// Time on air in milliseconds, if reported.
    pub airtime_ms: Option<u32>,
}

/// Result carried by a U-data / C-data TX indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// Packet sent.
    Sent,
    /// Packet sent, channel info attached.
    SentWithInfo(TxChannelInfo),
    /// Maximum number of retransmissions reached.
    RetransmissionsExhausted,
    /// Payload too large for the current data rate.
    PayloadTooLarge,
    /// Any other error code.
    Error(u8),
}

/// Result carried by a join-transmit indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinTxOutcome {
    /// Join request sent.
    Sent,
    /// Join request sent, channel info attached.
    SentWithInfo {
        /// Channel index.
        channel_index: u8,
        /// Data rate index.
        data_rate: u8,
        /// Join attempt number.
        attempt: u8,
    },
    /// Any other error code.
    Error(u8),
}

/// Result carried by a join-network indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Join accepted.
    Accepted {
        /// Address assigned by the network.
        device_address: u32,
        /// Radio parameters of the join accept, if attached.
        channel_info: Option<RxChannelInfo>,
    },
    /// No join accept received.
    Timeout,
}

/// Downlink application data from a receive indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxData {
    /// Indication flags.
    pub flags: RxFlags,
    /// LoRaWAN port, absent when the indication carries no data.
    pub port: Option<u8>,
    /// Application payload.
    pub payload: bytes::Bytes,
    /// Radio parameters, if attached.
    pub channel_info: Option<RxChannelInfo>,
}

/// MAC commands from a receive indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxMacCommands {
    /// Indication flags.
    pub flags: RxFlags,
    /// Raw MAC command bytes.
    pub commands: bytes::Bytes,
    /// Radio parameters, if attached.
    pub channel_info: Option<RxChannelInfo>,
}
