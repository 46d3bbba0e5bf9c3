//! WiMOD LoRaWAN Host Controller Interface
//!
//! This crate provides the host side message codec for IMST WiMOD LoRaWAN
//! radio modules. After the serial framing (SLIP + CRC16) has been removed,
//! every HCI message is a service access point id, a message id and a
//! payload.
//!
//! # Protocol Overview
//!
//! Two endpoints are supported:
//!
//! - **Device Management** (SAP 0x01): ping, reset, identity, firmware
//!   version, status counters, real time clock and alarm, operation mode
//! - **LoRaWAN** (SAP 0x10): activation, join, uplink data, radio stack
//!   configuration, network status, and downlink/transmit indications
//!
//! Messages are either:
//!
//! - **Requests** (host → module): encoded by [`encode`] or [`Request::encode`]
//! - **Responses** (module → host): request id + 1, status byte first
//! - **Indications** (module → host): unsolicited events such as received data
//!
//! # Example
//!
//! ```rust,ignore
//! use wimod_hci::{DevMgmtRequest, HciConfig, Message, Request, RtcTime, Envelope};
//!
//! let config = HciConfig::default();
//! let time = RtcTime::new(2018, 5, 20, 12, 30, 30)?;
//! let envelope = Request::from(DevMgmtRequest::SetRtc(time)).encode(&config)?;
//! let bytes = envelope.to_wire();
//!
//! // Decode whatever comes back
//! let inbound = Envelope::from_wire(&received, config.payload_capacity)?;
//! let message = Message::decode(&inbound)?;
//! ```

mod commands;
mod config;
mod constants;
mod envelope;
mod error;
mod responses;
mod rtc;
mod session;
mod status;
mod types;

pub use commands::*;
pub use config::*;
pub use constants::*;
pub use envelope::*;
pub use error::*;
pub use responses::*;
pub use rtc::*;
pub use session::*;
pub use status::*;
pub use types::*;
