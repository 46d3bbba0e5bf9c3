//! HCI message envelope.
//!
//! After the serial framing has been stripped, an HCI message is:
//!
//! ```text
//! +--------+--------+---------------------+
//! | sap_id | msg_id | payload[0..len]     |
//! +--------+--------+---------------------+
//! ```
//!
//! Every encode or decode call works on its own envelope; nothing is shared
//! between calls.

use bytes::{BufMut, Bytes};

use crate::error::{HciError, HciResult};
use crate::types::Endpoint;

/// Bytes of header ahead of the payload.
pub const ENVELOPE_HEADER_LEN: usize = 2;

/// One HCI message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    endpoint: Endpoint,
    kind: u8,
    payload: Bytes,
}

impl Envelope {
    /// Build an envelope, rejecting payloads larger than `capacity`.
    pub fn new(
        endpoint: Endpoint,
        kind: u8,
        payload: impl Into<Bytes>,
        capacity: usize,
    ) -> HciResult<Self> {
        let payload = payload.into();
        if payload.len() > capacity {
            return Err(HciError::Overflow {
                capacity,
                actual: payload.len(),
            });
        }
        Ok(Envelope {
            endpoint,
            kind,
            payload,
        })
    }

    /// Endpoint the message belongs to.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Message identifier.
    pub fn kind(&self) -> u8 {
        self.kind
    }

    /// Payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Serialize as `[sap_id, msg_id, payload...]`.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(ENVELOPE_HEADER_LEN + self.payload.len());
        buf.put_u8(self.endpoint.sap_id());
        buf.put_u8(self.kind);
        buf.put_slice(&self.payload);
        buf
    }

    /// Parse a de-framed HCI message.
    pub fn from_wire(frame: &[u8], capacity: usize) -> HciResult<Self> {
        if frame.len() < ENVELOPE_HEADER_LEN {
            return Err(HciError::FrameTooShort {
                expected: ENVELOPE_HEADER_LEN,
                actual: frame.len(),
            });
        }
        let endpoint = Endpoint::try_from(frame[0])?;
        log::trace!("rx frame: {:02X?}", frame);
        Envelope::new(
            endpoint,
            frame[1],
            Bytes::copy_from_slice(&frame[ENVELOPE_HEADER_LEN..]),
            capacity,
        )
    }
}
