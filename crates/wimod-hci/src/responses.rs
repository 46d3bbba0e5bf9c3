//! Responses and indications received from the module.
//!
//! Decoding dispatches on the endpoint first and the message kind second.
//! Each decoder reads its own fixed offsets, checks the payload length
//! before touching it and produces an owned record; nothing borrows from
//! the received envelope.
//!
//! Records that only exist on success are `None` whenever the status byte
//! reports a failure.

use bytes::Bytes;

use crate::constants::*;
use crate::envelope::Envelope;
use crate::error::{HciError, HciResult};
use crate::rtc::RtcTime;
use crate::types::*;

// ============================================================================
// Decoded Messages
// ============================================================================

/// Messages received on the Device Management endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevMgmtMessage {
    /// Ping response.
    Ping(Status),
    /// Reset response.
    Reset(Status),
    /// Set RTC response.
    SetRtc(Status),
    /// Set RTC alarm response.
    SetRtcAlarm(Status),
    /// Clear RTC alarm response.
    ClearRtcAlarm(Status),
    /// Set operation mode response.
    SetOpMode(Status),
    /// Get operation mode response.
    OpMode {
        /// Response status.
        status: Status,
        /// Current mode.
        mode: Option<OpMode>,
    },
    /// Get RTC response.
    Rtc {
        /// Response status.
        status: Status,
        /// Current time.
        time: Option<RtcTime>,
    },
    /// Get RTC alarm response.
    RtcAlarm {
        /// Response status.
        status: Status,
        /// Alarm state.
        alarm: Option<RtcAlarmStatus>,
    },
    /// Get device info response.
    DeviceInfo {
        /// Response status.
        status: Status,
        /// Module identity.
        info: Option<DeviceInfo>,
    },
    /// Get firmware version response.
    FirmwareVersion {
        /// Response status.
        status: Status,
        /// Firmware information.
        version: Option<FirmwareVersion>,
    },
    /// Get device status response.
    DeviceStatus {
        /// Response status.
        status: Status,
        /// Device counters.
        device_status: Option<DeviceStatus>,
    },
}

/// Messages received on the LoRaWAN endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoRaWanMessage {
    /// Activate device response.
    ActivateDevice(Status),
    /// Reactivate device response.
    Reactivate {
        /// Response status.
        status: Status,
        /// Restored device address.
        device_address: Option<u32>,
    },
    /// Deactivate device response.
    Deactivate(Status),
    /// Set join parameters response.
    SetJoinParameters(Status),
    /// Join network response.
    JoinNetwork(Status),
    /// Send unconfirmed data response.
    SendUnconfirmedData(Status),
    /// Send confirmed data response.
    SendConfirmedData(Status),
    /// Send MAC command response.
    SendMacCommand(Status),
    /// Set custom configuration response.
    SetCustomConfig(Status),
    /// Factory reset response.
    FactoryReset(Status),
    /// Set LinkADRReq option response.
    SetLinkAdrConfig(Status),
    /// Set device EUI response.
    SetDeviceEui(Status),
    /// Set battery level response.
    SetBatteryLevel(Status),
    /// Set radio stack configuration response.
    SetRadioStackConfig {
        /// Response status.
        status: Status,
        /// Rejected parameters, reported with a wrong-parameter status.
        errors: Option<RadioStackErrors>,
    },
    /// Get radio stack configuration response.
    RadioStackConfig {
        /// Response status.
        status: Status,
        /// Current configuration.
        config: Option<RadioStackConfig>,
    },
    /// Get supported bands response.
    SupportedBands {
        /// Response status.
        status: Status,
        /// Supported bands, empty on failure.
        bands: Vec<SupportedBand>,
    },
    /// Get device EUI response.
    DeviceEui {
        /// Response status.
        status: Status,
        /// Device EUI, every byte after the status.
        eui: Option<Bytes>,
    },
    /// Get custom configuration response.
    CustomConfig {
        /// Response status.
        status: Status,
        /// RF gain in dBd.
        rf_gain_dbd: Option<i8>,
    },
    /// Get network status response.
    NetworkStatus {
        /// Response status.
        status: Status,
        /// Network state.
        network: Option<NetworkStatus>,
    },
    /// Get LinkADRReq option response.
    LinkAdrConfig {
        /// Response status.
        status: Status,
        /// Current option.
        option: Option<LinkAdrOption>,
    },
    /// Unconfirmed uplink transmitted.
    UnconfirmedDataTx(TxOutcome),
    /// Confirmed uplink transmitted.
    ConfirmedDataTx(TxOutcome),
    /// Join request transmitted.
    JoinTx(JoinTxOutcome),
    /// Join procedure finished.
    JoinResult(JoinOutcome),
    /// Unconfirmed downlink received.
    UnconfirmedDataRx(RxData),
    /// Confirmed downlink received.
    ConfirmedDataRx(RxData),
    /// MAC commands received.
    MacCommandRx(RxMacCommands),
    /// Receive windows closed without downlink data.
    NoData,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Device Management message.
    DevMgmt(DevMgmtMessage),
    /// LoRaWAN message.
    LoRaWan(LoRaWanMessage),
}

impl Message {
    /// Decode an envelope.
    pub fn decode(envelope: &Envelope) -> HciResult<Self> {
        let result = match envelope.endpoint() {
            Endpoint::DevMgmt => {
                DevMgmtMessage::decode(envelope.kind(), envelope.payload()).map(Message::DevMgmt)
            }
            Endpoint::LoRaWan => {
                LoRaWanMessage::decode(envelope.kind(), envelope.payload()).map(Message::LoRaWan)
            }
        };
        match &result {
            Ok(message) => log::debug!("decoded {:?}", message),
            Err(HciError::UnknownKind { endpoint, kind }) => {
                log::warn!("no decoder for {} message 0x{:02X}", endpoint, kind)
            }
            Err(err) => log::debug!("decode failed: {}", err),
        }
        result
    }

    /// Status byte of a response, `None` for indications.
    pub fn status(&self) -> Option<Status> {
        match self {
            Message::DevMgmt(msg) => Some(msg.status()),
            Message::LoRaWan(msg) => msg.status(),
        }
    }
}

/// Decode an envelope into a message.
pub fn decode(envelope: &Envelope) -> HciResult<Message> {
    Message::decode(envelope)
}

// ============================================================================
// Payload Helpers
// ============================================================================

fn require(kind: u8, payload: &[u8], expected: usize) -> HciResult<()> {
    if payload.len() < expected {
        return Err(HciError::MalformedPayload {
            kind,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn read_u16(payload: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([payload[offset], payload[offset + 1]])
}

fn read_u32(payload: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        payload[offset],
        payload[offset + 1],
        payload[offset + 2],
        payload[offset + 3],
    ])
}

fn read_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

fn read_status(endpoint: Endpoint, kind: u8, payload: &[u8]) -> HciResult<Status> {
    require(kind, payload, 1)?;
    Ok(Status::new(endpoint, payload[0]))
}

/// Decode the success-only record that follows the status byte.
fn on_success<T>(
    status: Status,
    kind: u8,
    payload: &[u8],
    expected: usize,
    parse: impl FnOnce(&[u8]) -> T,
) -> HciResult<Option<T>> {
    if !status.is_ok() {
        return Ok(None);
    }
    require(kind, payload, expected)?;
    Ok(Some(parse(payload)))
}

// ============================================================================
// Device Management
// ============================================================================

impl DevMgmtMessage {
    /// Decode a Device Management message payload.
    pub fn decode(kind: u8, payload: &[u8]) -> HciResult<Self> {
        let status = || read_status(Endpoint::DevMgmt, kind, payload);

        match kind {
            DEVMGMT_MSG_PING_RSP => Ok(DevMgmtMessage::Ping(status()?)),
            DEVMGMT_MSG_RESET_RSP => Ok(DevMgmtMessage::Reset(status()?)),
            DEVMGMT_MSG_SET_RTC_RSP => Ok(DevMgmtMessage::SetRtc(status()?)),
            DEVMGMT_MSG_SET_RTC_ALARM_RSP => Ok(DevMgmtMessage::SetRtcAlarm(status()?)),
            DEVMGMT_MSG_CLEAR_RTC_ALARM_RSP => Ok(DevMgmtMessage::ClearRtcAlarm(status()?)),
            DEVMGMT_MSG_SET_OPMODE_RSP => Ok(DevMgmtMessage::SetOpMode(status()?)),

            DEVMGMT_MSG_GET_OPMODE_RSP => {
                let status = status()?;
                let mode = on_success(status, kind, payload, 2, |p| OpMode::from(p[1]))?;
                Ok(DevMgmtMessage::OpMode { status, mode })
            }

            DEVMGMT_MSG_GET_RTC_RSP => {
                let status = status()?;
                let time = on_success(status, kind, payload, 5, |p| {
                    RtcTime::unpack(read_u32(p, 1))
                })?;
                Ok(DevMgmtMessage::Rtc { status, time })
            }

            DEVMGMT_MSG_GET_RTC_ALARM_RSP => {
                let status = status()?;
                // Time of day is a 3-byte little-endian word at offset 3.
                let alarm = on_success(status, kind, payload, 6, |p| {
                    let time = u32::from_le_bytes([p[3], p[4], p[5], 0]);
                    RtcAlarmStatus {
                        alarm_set: p[1] != 0,
                        daily: p[2] != 0,
                        hour: (time & 0xFF) as u8,
                        minute: ((time >> 8) & 0xFF) as u8,
                        second: ((time >> 16) & 0xFF) as u8,
                    }
                })?;
                Ok(DevMgmtMessage::RtcAlarm { status, alarm })
            }

            DEVMGMT_MSG_GET_DEVICE_INFO_RSP => {
                let status = status()?;
                let info = on_success(status, kind, payload, 10, |p| DeviceInfo {
                    module_type: p[1],
                    device_address: read_u32(p, 2),
                    device_id: read_u32(p, 6),
                })?;
                Ok(DevMgmtMessage::DeviceInfo { status, info })
            }

            DEVMGMT_MSG_GET_FW_VERSION_RSP => {
                let status = status()?;
                let version = on_success(status, kind, payload, 5 + BUILD_DATE_LEN, |p| {
                    FirmwareVersion {
                        minor: p[1],
                        major: p[2],
                        build: read_u16(p, 3),
                        build_date: read_text(&p[5..5 + BUILD_DATE_LEN]),
                        content: read_text(&p[5 + BUILD_DATE_LEN..]),
                    }
                })?;
                Ok(DevMgmtMessage::FirmwareVersion { status, version })
            }

            DEVMGMT_MSG_GET_DEVICE_STATUS_RSP => {
                let status = status()?;
                let device_status = on_success(status, kind, payload, DEVICE_STATUS_LEN, |p| {
                    DeviceStatus {
                        tick_resolution: p[1],
                        system_tick: read_u32(p, 2),
                        target_time: RtcTime::unpack(read_u32(p, 6)),
                        nvm_status: read_u16(p, 10),
                        battery_mv: read_u16(p, 12),
                        tx_unconfirmed: read_u32(p, 16),
                        tx_confirmed: read_u32(p, 20),
                        tx_error: read_u32(p, 24),
                        rx1_unconfirmed: read_u32(p, 28),
                        rx1_confirmed: read_u32(p, 32),
                        rx1_mic_error: read_u32(p, 36),
                        rx2_unconfirmed: read_u32(p, 40),
                        rx2_confirmed: read_u32(p, 44),
                        rx2_mic_error: read_u32(p, 48),
                        tx_join: read_u32(p, 52),
                        rx_accept: read_u32(p, 56),
                    }
                })?;
                Ok(DevMgmtMessage::DeviceStatus {
                    status,
                    device_status,
                })
            }

            _ => Err(HciError::UnknownKind {
                endpoint: Endpoint::DevMgmt,
                kind,
            }),
        }
    }

    /// Status byte of the response.
    pub fn status(&self) -> Status {
        match self {
            DevMgmtMessage::Ping(status)
            | DevMgmtMessage::Reset(status)
            | DevMgmtMessage::SetRtc(status)
            | DevMgmtMessage::SetRtcAlarm(status)
            | DevMgmtMessage::ClearRtcAlarm(status)
            | DevMgmtMessage::SetOpMode(status)
            | DevMgmtMessage::OpMode { status, .. }
            | DevMgmtMessage::Rtc { status, .. }
            | DevMgmtMessage::RtcAlarm { status, .. }
            | DevMgmtMessage::DeviceInfo { status, .. }
            | DevMgmtMessage::FirmwareVersion { status, .. }
            | DevMgmtMessage::DeviceStatus { status, .. } => *status,
        }
    }
}

// ============================================================================
// LoRaWAN
// ============================================================================

impl LoRaWanMessage {
    /// Decode a LoRaWAN message payload.
    pub fn decode(kind: u8, payload: &[u8]) -> HciResult<Self> {
        let status = || read_status(Endpoint::LoRaWan, kind, payload);

        match kind {
            LORAWAN_MSG_ACTIVATE_DEVICE_RSP => Ok(LoRaWanMessage::ActivateDevice(status()?)),
            LORAWAN_MSG_DEACTIVATE_DEVICE_RSP => Ok(LoRaWanMessage::Deactivate(status()?)),
            LORAWAN_MSG_SET_JOIN_PARAM_RSP => Ok(LoRaWanMessage::SetJoinParameters(status()?)),
            LORAWAN_MSG_JOIN_NETWORK_RSP => Ok(LoRaWanMessage::JoinNetwork(status()?)),
            LORAWAN_MSG_SEND_UDATA_RSP => Ok(LoRaWanMessage::SendUnconfirmedData(status()?)),
            LORAWAN_MSG_SEND_CDATA_RSP => Ok(LoRaWanMessage::SendConfirmedData(status()?)),
            LORAWAN_MSG_SEND_MAC_CMD_RSP => Ok(LoRaWanMessage::SendMacCommand(status()?)),
            LORAWAN_MSG_SET_CUSTOM_CFG_RSP => Ok(LoRaWanMessage::SetCustomConfig(status()?)),
            LORAWAN_MSG_FACTORY_RESET_RSP => Ok(LoRaWanMessage::FactoryReset(status()?)),
            LORAWAN_MSG_SET_LINKADRREQ_CONFIG_RSP => {
                Ok(LoRaWanMessage::SetLinkAdrConfig(status()?))
            }
            LORAWAN_MSG_SET_DEVICE_EUI_RSP => Ok(LoRaWanMessage::SetDeviceEui(status()?)),
            LORAWAN_MSG_SET_BATTERY_LEVEL_RSP => Ok(LoRaWanMessage::SetBatteryLevel(status()?)),

            LORAWAN_MSG_REACTIVATE_DEVICE_RSP => {
                let status = status()?;
                let device_address = on_success(status, kind, payload, 5, |p| read_u32(p, 1))?;
                Ok(LoRaWanMessage::Reactivate {
                    status,
                    device_address,
                })
            }

            LORAWAN_MSG_SET_RSTACK_CONFIG_RSP => {
                let status = status()?;
                let errors = if status.code == LORAWAN_STATUS_WRONG_PARAMETER {
                    payload.get(1).map(|&bits| RadioStackErrors(bits))
                } else {
                    None
                };
                Ok(LoRaWanMessage::SetRadioStackConfig { status, errors })
            }

            LORAWAN_MSG_GET_RSTACK_CONFIG_RSP => {
                let status = status()?;
                let config = on_success(status, kind, payload, 1 + RSTACK_CONFIG_LEN, |p| {
                    let mut block = [0u8; RSTACK_CONFIG_LEN];
                    block.copy_from_slice(&p[1..1 + RSTACK_CONFIG_LEN]);
                    RadioStackConfig::from_bytes(&block)
                })?;
                Ok(LoRaWanMessage::RadioStackConfig { status, config })
            }

            LORAWAN_MSG_GET_SUPPORTED_BANDS_RSP => {
                let status = status()?;
                let mut bands = Vec::new();
                if status.is_ok() {
                    let pairs = payload[1..].chunks_exact(2);
                    if !pairs.remainder().is_empty() {
                        log::warn!("supported bands list has a dangling byte, ignoring it");
                    }
                    bands.extend(pairs.map(|pair| SupportedBand {
                        band_index: pair[0],
                        max_eirp: pair[1],
                    }));
                }
                Ok(LoRaWanMessage::SupportedBands { status, bands })
            }

            LORAWAN_MSG_GET_DEVICE_EUI_RSP => {
                let status = status()?;
                let eui = on_success(status, kind, payload, 1, |p| Bytes::copy_from_slice(&p[1..]))?;
                Ok(LoRaWanMessage::DeviceEui { status, eui })
            }

            LORAWAN_MSG_GET_CUSTOM_CFG_RSP => {
                let status = status()?;
                let rf_gain_dbd = on_success(status, kind, payload, 2, |p| p[1] as i8)?;
                Ok(LoRaWanMessage::CustomConfig {
                    status,
                    rf_gain_dbd,
                })
            }

            LORAWAN_MSG_GET_NWK_STATUS_RSP => {
                let status = status()?;
                let network = if status.is_ok() {
                    Some(decode_network_status(kind, payload)?)
                } else {
                    None
                };
                Ok(LoRaWanMessage::NetworkStatus { status, network })
            }

            LORAWAN_MSG_GET_LINKADRREQ_CONFIG_RSP => {
                let status = status()?;
                let option = on_success(status, kind, payload, 2, |p| LinkAdrOption::from(p[1]))?;
                Ok(LoRaWanMessage::LinkAdrConfig { status, option })
            }

            LORAWAN_MSG_SEND_UDATA_IND => {
                Ok(LoRaWanMessage::UnconfirmedDataTx(decode_tx_outcome(kind, payload)?))
            }
            LORAWAN_MSG_SEND_CDATA_IND => {
                Ok(LoRaWanMessage::ConfirmedDataTx(decode_tx_outcome(kind, payload)?))
            }

            LORAWAN_MSG_JOIN_TRANSMIT_IND => {
                require(kind, payload, 1)?;
                let outcome = match payload[0] {
                    0 => JoinTxOutcome::Sent,
                    1 => {
                        require(kind, payload, 4)?;
                        JoinTxOutcome::SentWithInfo {
                            channel_index: payload[1],
                            data_rate: payload[2],
                            attempt: payload[3],
                        }
                    }
                    code => JoinTxOutcome::Error(code),
                };
                Ok(LoRaWanMessage::JoinTx(outcome))
            }

            LORAWAN_MSG_JOIN_NETWORK_IND => {
                require(kind, payload, 1)?;
                let outcome = match payload[0] {
                    0 => {
                        require(kind, payload, 5)?;
                        JoinOutcome::Accepted {
                            device_address: read_u32(payload, 1),
                            channel_info: None,
                        }
                    }
                    1 => {
                        require(kind, payload, 5 + RX_CHANNEL_INFO_LEN)?;
                        JoinOutcome::Accepted {
                            device_address: read_u32(payload, 1),
                            channel_info: Some(read_channel_info(&payload[5..10])),
                        }
                    }
                    _ => JoinOutcome::Timeout,
                };
                Ok(LoRaWanMessage::JoinResult(outcome))
            }

            LORAWAN_MSG_RECV_UDATA_IND => {
                Ok(LoRaWanMessage::UnconfirmedDataRx(decode_rx_data(kind, payload)?))
            }
            LORAWAN_MSG_RECV_CDATA_IND => {
                Ok(LoRaWanMessage::ConfirmedDataRx(decode_rx_data(kind, payload)?))
            }

            LORAWAN_MSG_RECV_MAC_CMD_IND => {
                let (flags, region, channel_info) = split_rx_indication(kind, payload)?;
                Ok(LoRaWanMessage::MacCommandRx(RxMacCommands {
                    flags,
                    commands: Bytes::copy_from_slice(region),
                    channel_info,
                }))
            }

            LORAWAN_MSG_RECV_NODATA_IND => Ok(LoRaWanMessage::NoData),

            _ => Err(HciError::UnknownKind {
                endpoint: Endpoint::LoRaWan,
                kind,
            }),
        }
    }

    /// Status byte of a response, `None` for indications.
    pub fn status(&self) -> Option<Status> {
        match self {
            LoRaWanMessage::ActivateDevice(status)
            | LoRaWanMessage::Deactivate(status)
            | LoRaWanMessage::SetJoinParameters(status)
            | LoRaWanMessage::JoinNetwork(status)
            | LoRaWanMessage::SendUnconfirmedData(status)
            | LoRaWanMessage::SendConfirmedData(status)
            | LoRaWanMessage::SendMacCommand(status)
            | LoRaWanMessage::SetCustomConfig(status)
            | LoRaWanMessage::FactoryReset(status)
            | LoRaWanMessage::SetLinkAdrConfig(status)
            | LoRaWanMessage::SetDeviceEui(status)
            | LoRaWanMessage::SetBatteryLevel(status)
            | LoRaWanMessage::Reactivate { status, .. }
            | LoRaWanMessage::SetRadioStackConfig { status, .. }
            | LoRaWanMessage::RadioStackConfig { status, .. }
            | LoRaWanMessage::SupportedBands { status, .. }
            | LoRaWanMessage::DeviceEui { status, .. }
            | LoRaWanMessage::CustomConfig { status, .. }
            | LoRaWanMessage::NetworkStatus { status, .. }
            | LoRaWanMessage::LinkAdrConfig { status, .. } => Some(*status),
            LoRaWanMessage::UnconfirmedDataTx(_)
            | LoRaWanMessage::ConfirmedDataTx(_)
            | LoRaWanMessage::JoinTx(_)
            | LoRaWanMessage::JoinResult(_)
            | LoRaWanMessage::UnconfirmedDataRx(_)
            | LoRaWanMessage::ConfirmedDataRx(_)
            | LoRaWanMessage::MacCommandRx(_)
            | LoRaWanMessage::NoData => None,
        }
    }
}

fn read_channel_info(bytes: &[u8]) -> RxChannelInfo {
    let mut block = [0u8; RX_CHANNEL_INFO_LEN];
    block.copy_from_slice(&bytes[..RX_CHANNEL_INFO_LEN]);
    RxChannelInfo::from_bytes(&block)
}

fn decode_network_status(kind: u8, payload: &[u8]) -> HciResult<NetworkStatus> {
    require(kind, payload, 2)?;
    let state = NetworkState::from(payload[1]);
    let link = match state {
        NetworkState::Inactive | NetworkState::Other(_) => None,
        NetworkState::ActiveAbp | NetworkState::ActiveOtaa | NetworkState::Joining => {
            require(kind, payload, 9)?;
            Some(NetworkLink {
                device_address: read_u32(payload, 2),
                data_rate: payload[6],
                tx_power: payload[7],
                max_payload: payload[8],
            })
        }
    };
    Ok(NetworkStatus { state, link })
}

fn decode_tx_outcome(kind: u8, payload: &[u8]) -> HciResult<TxOutcome> {
    require(kind, payload, 1)?;
    let code = payload[0];
    Ok(match code {
        0 => TxOutcome::Sent,
        1 => {
            require(kind, payload, 5)?;
            TxOutcome::SentWithInfo(TxChannelInfo {
                channel_index: payload[1],
                data_rate: payload[2],
                transmissions: payload[3],
                tx_power_dbm: payload[4],
                airtime_ms: (payload.len() >= 9).then(|| read_u32(payload, 5)),
            })
        }
        _ if code & TX_IND_RETRANSMISSIONS_EXHAUSTED != 0 => TxOutcome::RetransmissionsExhausted,
        _ if code & TX_IND_PAYLOAD_TOO_LARGE != 0 => TxOutcome::PayloadTooLarge,
        _ => TxOutcome::Error(code),
    })
}

/// Split a receive indication into flags, data region and channel info.
///
/// Layout is `[flags] [data...] [channel info (5)]`, the trailer present
/// only when flag bit 0 is set. A payload too short to hold the flag byte
/// and the announced trailer is rejected.
fn split_rx_indication(
    kind: u8,
    payload: &[u8],
) -> HciResult<(RxFlags, &[u8], Option<RxChannelInfo>)> {
    require(kind, payload, 1)?;
    let flags = RxFlags(payload[0]);
    let trailer = if flags.channel_info_attached() {
        RX_CHANNEL_INFO_LEN
    } else {
        0
    };
    require(kind, payload, 1 + trailer)?;

    let data_end = payload.len() - trailer;
    let channel_info = flags
        .channel_info_attached()
        .then(|| read_channel_info(&payload[data_end..]));
    Ok((flags, &payload[1..data_end], channel_info))
}

fn decode_rx_data(kind: u8, payload: &[u8]) -> HciResult<RxData> {
    let (flags, region, channel_info) = split_rx_indication(kind, payload)?;
    let (port, data) = match region.split_first() {
        Some((&port, data)) => (Some(port), data),
        None => (None, &[][..]),
    };
    Ok(RxData {
        flags,
        port,
        payload: Bytes::copy_from_slice(data),
        channel_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorawan(kind: u8, payload: &[u8]) -> LoRaWanMessage {
        LoRaWanMessage::decode(kind, payload).expect("should decode")
    }

    fn devmgmt(kind: u8, payload: &[u8]) -> DevMgmtMessage {
        DevMgmtMessage::decode(kind, payload).expect("should decode")
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            DevMgmtMessage::decode(0x7F, &[0]).unwrap_err(),
            HciError::UnknownKind {
                endpoint: Endpoint::DevMgmt,
                kind: 0x7F
            }
        );
        for kind in [0x00, 0x01, 0x15, 0xFF] {
            assert!(matches!(
                LoRaWanMessage::decode(kind, &[0; 16]),
                Err(HciError::UnknownKind { .. })
            ));
        }
    }

    #[test]
    fn test_empty_response_is_malformed() {
        assert_eq!(
            DevMgmtMessage::decode(DEVMGMT_MSG_PING_RSP, &[]).unwrap_err(),
            HciError::MalformedPayload {
                kind: DEVMGMT_MSG_PING_RSP,
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_message_decode_from_envelope() {
        let env = Envelope::new(Endpoint::LoRaWan, LORAWAN_MSG_JOIN_NETWORK_RSP, vec![0x06], 300)
            .unwrap();
        let message = decode(&env).unwrap();
        assert_eq!(
            message,
            Message::LoRaWan(LoRaWanMessage::JoinNetwork(Status::new(Endpoint::LoRaWan, 6)))
        );
        let status = message.status().unwrap();
        assert_eq!(status.label, Some("device busy - command rejected"));
    }

    // ========================================================================
    // Device Management
    // ========================================================================

    #[test]
    fn test_device_info() {
        let payload = [0x00, 0x98, 0x78, 0x56, 0x34, 0x12, 0x01, 0x00, 0x00, 0x00];
        match devmgmt(DEVMGMT_MSG_GET_DEVICE_INFO_RSP, &payload) {
            DevMgmtMessage::DeviceInfo { status, info } => {
                assert!(status.is_ok());
                let info = info.unwrap();
                assert_eq!(info.module_type, 0x98);
                assert_eq!(info.module_name(), Some("iM880B-L"));
                assert_eq!(info.device_address, 0x1234_5678);
                assert_eq!(info.device_id, 1);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_record_absent_on_failure() {
        match devmgmt(DEVMGMT_MSG_GET_DEVICE_INFO_RSP, &[0x01]) {
            DevMgmtMessage::DeviceInfo { status, info } => {
                assert_eq!(status.code, 1);
                assert!(info.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }

        match devmgmt(DEVMGMT_MSG_GET_DEVICE_STATUS_RSP, &[0x04]) {
            DevMgmtMessage::DeviceStatus { device_status, .. } => assert!(device_status.is_none()),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_short_success_record_is_malformed() {
        assert_eq!(
            DevMgmtMessage::decode(DEVMGMT_MSG_GET_DEVICE_INFO_RSP, &[0x00, 0x98]).unwrap_err(),
            HciError::MalformedPayload {
                kind: DEVMGMT_MSG_GET_DEVICE_INFO_RSP,
                expected: 10,
                actual: 2
            }
        );
    }

    #[test]
    fn test_firmware_version() {
        let mut payload = vec![0x00, 0x05, 0x02, 0x2C, 0x01];
        payload.extend_from_slice(b"25.05.2018");
        payload.extend_from_slice(b"LoRaWAN_Modem\0");
        match devmgmt(DEVMGMT_MSG_GET_FW_VERSION_RSP, &payload) {
            DevMgmtMessage::FirmwareVersion { version, .. } => {
                let version = version.unwrap();
                assert_eq!((version.major, version.minor), (2, 5));
                assert_eq!(version.build, 300);
                assert_eq!(version.build_date, "25.05.2018");
                assert_eq!(version.content, "LoRaWAN_Modem");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_device_status_offsets() {
        let mut payload = vec![0u8; DEVICE_STATUS_LEN];
        payload[1] = 10;
        payload[2..6].copy_from_slice(&1000u32.to_le_bytes());
        let target = RtcTime::new(2020, 2, 29, 8, 0, 1).unwrap();
        payload[6..10].copy_from_slice(&target.to_bytes().unwrap());
        payload[10..12].copy_from_slice(&0x0003u16.to_le_bytes());
        payload[12..14].copy_from_slice(&3300u16.to_le_bytes());
        for (i, offset) in (16..60).step_by(4).enumerate() {
            payload[offset..offset + 4].copy_from_slice(&(i as u32 + 1).to_le_bytes());
        }

        match devmgmt(DEVMGMT_MSG_GET_DEVICE_STATUS_RSP, &payload) {
            DevMgmtMessage::DeviceStatus { device_status, .. } => {
                let s = device_status.unwrap();
                assert_eq!(s.tick_resolution, 10);
                assert_eq!(s.system_tick, 1000);
                assert_eq!(s.target_time, target);
                assert_eq!(s.nvm_status, 3);
                assert_eq!(s.battery_mv, 3300);
                assert_eq!(s.tx_unconfirmed, 1);
                assert_eq!(s.tx_confirmed, 2);
                assert_eq!(s.tx_error, 3);
                assert_eq!(s.rx1_unconfirmed, 4);
                assert_eq!(s.rx1_confirmed, 5);
                assert_eq!(s.rx1_mic_error, 6);
                assert_eq!(s.rx2_unconfirmed, 7);
                assert_eq!(s.rx2_confirmed, 8);
                assert_eq!(s.rx2_mic_error, 9);
                assert_eq!(s.tx_join, 10);
                assert_eq!(s.rx_accept, 11);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_get_rtc() {
        let time = RtcTime::new(2018, 5, 20, 12, 30, 30).unwrap();
        let mut payload = vec![0x00];
        payload.extend_from_slice(&time.to_bytes().unwrap());
        assert_eq!(
            devmgmt(DEVMGMT_MSG_GET_RTC_RSP, &payload),
            DevMgmtMessage::Rtc {
                status: Status::new(Endpoint::DevMgmt, 0),
                time: Some(time)
            }
        );
    }

    #[test]
    fn test_get_rtc_alarm() {
        let payload = [0x00, 0x01, 0x01, 7, 45, 30];
        match devmgmt(DEVMGMT_MSG_GET_RTC_ALARM_RSP, &payload) {
            DevMgmtMessage::RtcAlarm { alarm, .. } => {
                let alarm = alarm.unwrap();
                assert!(alarm.alarm_set);
                assert!(alarm.daily);
                assert_eq!((alarm.hour, alarm.minute, alarm.second), (7, 45, 30));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_get_opmode() {
        assert_eq!(
            devmgmt(DEVMGMT_MSG_GET_OPMODE_RSP, &[0x00, 0x00]),
            DevMgmtMessage::OpMode {
                status: Status::new(Endpoint::DevMgmt, 0),
                mode: Some(OpMode::Standard)
            }
        );
    }

    // ========================================================================
    // LoRaWAN
    // ========================================================================

    #[test]
    fn test_rx_data_without_channel_info() {
        let payload = [0x02, 0x0A, 0xDE, 0xAD];
        match lorawan(LORAWAN_MSG_RECV_UDATA_IND, &payload) {
            LoRaWanMessage::UnconfirmedDataRx(rx) => {
                assert!(rx.flags.acknowledged());
                assert!(!rx.flags.frame_pending());
                assert_eq!(rx.port, Some(0x0A));
                assert_eq!(&rx.payload[..], &[0xDE, 0xAD]);
                assert!(rx.channel_info.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_rx_data_with_channel_info() {
        let payload = [0x05, 0x0A, 0x42, 3, 5, 0xB5, 0xFA, 1];
        match lorawan(LORAWAN_MSG_RECV_CDATA_IND, &payload) {
            LoRaWanMessage::ConfirmedDataRx(rx) => {
                assert!(rx.flags.frame_pending());
                assert_eq!(rx.port, Some(0x0A));
                assert_eq!(&rx.payload[..], &[0x42]);
                let info = rx.channel_info.unwrap();
                assert_eq!(info.channel_index, 3);
                assert_eq!(info.data_rate, 5);
                assert_eq!(info.rssi, -75);
                assert_eq!(info.snr, -6);
                assert_eq!(info.rx_slot, 1);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_rx_data_only_flags_and_channel_info() {
        let payload = [0x01, 3, 5, 0xB5, 0xFA, 1];
        match lorawan(LORAWAN_MSG_RECV_UDATA_IND, &payload) {
            LoRaWanMessage::UnconfirmedDataRx(rx) => {
                assert_eq!(rx.port, None);
                assert!(rx.payload.is_empty());
                assert!(rx.channel_info.is_some());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_rx_data_negative_length_rejected() {
        assert_eq!(
            LoRaWanMessage::decode(LORAWAN_MSG_RECV_UDATA_IND, &[0x01, 1, 2, 3]).unwrap_err(),
            HciError::MalformedPayload {
                kind: LORAWAN_MSG_RECV_UDATA_IND,
                expected: 6,
                actual: 4
            }
        );
    }

    #[test]
    fn test_mac_command_rx() {
        let payload = [0x01, 0x02, 0x05, 0x01, 2, 1, 0xC0, 0x07, 0];
        match lorawan(LORAWAN_MSG_RECV_MAC_CMD_IND, &payload) {
            LoRaWanMessage::MacCommandRx(rx) => {
                assert_eq!(&rx.commands[..], &[0x02, 0x05, 0x01]);
                assert_eq!(rx.channel_info.unwrap().rssi, -64);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_tx_indication() {
        assert_eq!(
            lorawan(LORAWAN_MSG_SEND_UDATA_IND, &[0x00]),
            LoRaWanMessage::UnconfirmedDataTx(TxOutcome::Sent)
        );

        let payload = [0x01, 2, 5, 1, 14, 0x3A, 0x00, 0x00, 0x00];
        match lorawan(LORAWAN_MSG_SEND_CDATA_IND, &payload) {
            LoRaWanMessage::ConfirmedDataTx(TxOutcome::SentWithInfo(info)) => {
                assert_eq!(info.channel_index, 2);
                assert_eq!(info.data_rate, 5);
                assert_eq!(info.transmissions, 1);
                assert_eq!(info.tx_power_dbm, 14);
                assert_eq!(info.airtime_ms, Some(58));
            }
            other => panic!("unexpected message: {:?}", other),
        }

        assert_eq!(
            lorawan(LORAWAN_MSG_SEND_CDATA_IND, &[0x02]),
            LoRaWanMessage::ConfirmedDataTx(TxOutcome::RetransmissionsExhausted)
        );
        assert_eq!(
            lorawan(LORAWAN_MSG_SEND_UDATA_IND, &[0x04]),
            LoRaWanMessage::UnconfirmedDataTx(TxOutcome::PayloadTooLarge)
        );
        assert_eq!(
            lorawan(LORAWAN_MSG_SEND_UDATA_IND, &[0x08]),
            LoRaWanMessage::UnconfirmedDataTx(TxOutcome::Error(0x08))
        );
    }

    #[test]
    fn test_join_indications() {
        assert_eq!(
            lorawan(LORAWAN_MSG_JOIN_TRANSMIT_IND, &[0x01, 4, 0, 2]),
            LoRaWanMessage::JoinTx(JoinTxOutcome::SentWithInfo {
                channel_index: 4,
                data_rate: 0,
                attempt: 2
            })
        );

        assert_eq!(
            lorawan(LORAWAN_MSG_JOIN_NETWORK_IND, &[0x00, 0x04, 0x03, 0x02, 0x01]),
            LoRaWanMessage::JoinResult(JoinOutcome::Accepted {
                device_address: 0x0102_0304,
                channel_info: None
            })
        );

        match lorawan(
            LORAWAN_MSG_JOIN_NETWORK_IND,
            &[0x01, 0x04, 0x03, 0x02, 0x01, 1, 5, 0xC4, 0x07, 1],
        ) {
            LoRaWanMessage::JoinResult(JoinOutcome::Accepted { channel_info, .. }) => {
                assert_eq!(channel_info.unwrap().rssi, -60);
            }
            other => panic!("unexpected message: {:?}", other),
        }

        assert_eq!(
            lorawan(LORAWAN_MSG_JOIN_NETWORK_IND, &[0x02]),
            LoRaWanMessage::JoinResult(JoinOutcome::Timeout)
        );
    }

    #[test]
    fn test_device_eui_trailer() {
        let eui_of = |payload: &[u8]| match lorawan(LORAWAN_MSG_GET_DEVICE_EUI_RSP, payload) {
            LoRaWanMessage::DeviceEui { eui, .. } => eui,
            other => panic!("unexpected message: {:?}", other),
        };

        let eui = eui_of(&[0x00, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(&eui[..], &[1, 2, 3, 4, 5, 6, 7, 8]);

        let eui = eui_of(&[0x00, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(&eui[..], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let eui = eui_of(&[0x00, 1, 2, 3, 4]).unwrap();
        assert_eq!(&eui[..], &[1, 2, 3, 4]);

        assert_eq!(eui_of(&[0x01, 1, 2, 3]), None);
    }

    #[test]
    fn test_network_status() {
        let payload = [0x00, 0x02, 0x78, 0x56, 0x34, 0x12, 5, 14, 51];
        match lorawan(LORAWAN_MSG_GET_NWK_STATUS_RSP, &payload) {
            LoRaWanMessage::NetworkStatus { network, .. } => {
                let network = network.unwrap();
                assert_eq!(network.state, NetworkState::ActiveOtaa);
                let link = network.link.unwrap();
                assert_eq!(link.device_address, 0x1234_5678);
                assert_eq!(link.max_payload, 51);
            }
            other => panic!("unexpected message: {:?}", other),
        }

        match lorawan(LORAWAN_MSG_GET_NWK_STATUS_RSP, &[0x00, 0x00]) {
            LoRaWanMessage::NetworkStatus { network, .. } => {
                let network = network.unwrap();
                assert_eq!(network.state, NetworkState::Inactive);
                assert!(network.link.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }

        match lorawan(LORAWAN_MSG_GET_NWK_STATUS_RSP, &[0x00, 0x07]) {
            LoRaWanMessage::NetworkStatus { network, .. } => {
                let network = network.unwrap();
                assert_eq!(network.state, NetworkState::Other(7));
                assert!(network.link.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_supported_bands_dangling_byte() {
        match lorawan(LORAWAN_MSG_GET_SUPPORTED_BANDS_RSP, &[0x00, 1, 14, 3, 16, 9]) {
            LoRaWanMessage::SupportedBands { bands, .. } => {
                assert_eq!(
                    bands,
                    vec![
                        SupportedBand {
                            band_index: 1,
                            max_eirp: 14
                        },
                        SupportedBand {
                            band_index: 3,
                            max_eirp: 16
                        },
                    ]
                );
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_radio_stack_responses() {
        match lorawan(LORAWAN_MSG_SET_RSTACK_CONFIG_RSP, &[0x03, 0x21]) {
            LoRaWanMessage::SetRadioStackConfig { errors, .. } => {
                let errors = errors.unwrap();
                assert!(errors.wrong_data_rate());
                assert!(!errors.wrong_tx_power());
                assert!(errors.wrong_band_index());
            }
            other => panic!("unexpected message: {:?}", other),
        }

        match lorawan(LORAWAN_MSG_GET_RSTACK_CONFIG_RSP, &[0x00, 5, 14, 0x01, 0, 7, 1, 0]) {
            LoRaWanMessage::RadioStackConfig { config, .. } => {
                let config = config.unwrap();
                assert_eq!(config.data_rate, 5);
                assert!(config.adaptive_data_rate());
                assert_eq!(config.retransmissions, 7);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_small_lorawan_records() {
        assert_eq!(
            lorawan(LORAWAN_MSG_GET_CUSTOM_CFG_RSP, &[0x00, 0xFE]),
            LoRaWanMessage::CustomConfig {
                status: Status::new(Endpoint::LoRaWan, 0),
                rf_gain_dbd: Some(-2)
            }
        );
        assert_eq!(
            lorawan(LORAWAN_MSG_GET_LINKADRREQ_CONFIG_RSP, &[0x00, 0x01]),
            LoRaWanMessage::LinkAdrConfig {
                status: Status::new(Endpoint::LoRaWan, 0),
                option: Some(LinkAdrOption::Semtech)
            }
        );
        assert_eq!(
            lorawan(LORAWAN_MSG_REACTIVATE_DEVICE_RSP, &[0x05]),
            LoRaWanMessage::Reactivate {
                status: Status::new(Endpoint::LoRaWan, 5),
                device_address: None
            }
        );
        assert_eq!(lorawan(LORAWAN_MSG_RECV_NODATA_IND, &[]), LoRaWanMessage::NoData);
        assert_eq!(lorawan(LORAWAN_MSG_RECV_NODATA_IND, &[]).status(), None);
    }
}
