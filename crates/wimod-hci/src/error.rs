//! Codec, session and configuration error types.

use thiserror::Error;

use crate::types::Endpoint;

/// Result type for codec operations.
pub type HciResult<T> = Result<T, HciError>;

/// Errors produced while encoding or decoding HCI messages.
///
/// Every variant is recoverable: the caller may log it and keep going with
/// the next message. Status codes reported inside a response payload are
/// data and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HciError {
    /// The request kind has no encoder on this endpoint.
    #[error("unsupported request kind 0x{kind:02X} on {endpoint}")]
    UnsupportedKind {
        /// Endpoint the request was addressed to.
        endpoint: Endpoint,
        /// Requested message kind.
        kind: u8,
    },

    /// Argument length does not match the length rule of the request kind.
    #[error("length mismatch for kind 0x{kind:02X}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Request kind.
        kind: u8,
        /// Length required by the kind.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Argument value outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Payload does not fit in the envelope.
    #[error("payload overflow: capacity {capacity} bytes, got {actual}")]
    Overflow {
        /// Available payload capacity.
        capacity: usize,
        /// Bytes that would have been written.
        actual: usize,
    },

    /// No decoder exists for this inbound message kind.
    #[error("unknown message kind 0x{kind:02X} on {endpoint}")]
    UnknownKind {
        /// Endpoint the message arrived on.
        endpoint: Endpoint,
        /// Message kind.
        kind: u8,
    },

    /// The message is too short to hold the SAP and message identifiers.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Minimum length required.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// The SAP identifier names no known endpoint.
    #[error("unknown endpoint: 0x{0:02X}")]
    UnknownEndpoint(u8),

    /// The payload is shorter than the layout of its kind requires.
    #[error("malformed payload for kind 0x{kind:02X}: expected at least {expected} bytes, got {actual}")]
    MalformedPayload {
        /// Message kind.
        kind: u8,
        /// Minimum length required.
        expected: usize,
        /// Actual payload length.
        actual: usize,
    },
}

/// Errors produced by [`HciSession`](crate::HciSession).
#[derive(Error, Debug)]
pub enum SessionError<E> {
    /// Encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] HciError),

    /// The transport could not send the request.
    #[error("transport error: {0}")]
    Transport(E),

    /// A request is still waiting for its response.
    #[error("request 0x{kind:02X} on {endpoint} is still pending")]
    RequestPending {
        /// Endpoint of the pending request.
        endpoint: Endpoint,
        /// Kind of the pending request.
        kind: u8,
    },
}

impl<E> SessionError<E> {
    /// The codec error, if this is one.
    pub fn codec_error(&self) -> Option<&HciError> {
        match self {
            SessionError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors produced while loading an [`HciConfig`](crate::HciConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field holds a value outside its range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HciError::LengthMismatch {
            kind: 0x0D,
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch for kind 0x0D: expected 4 bytes, got 3"
        );

        let err = HciError::UnknownKind {
            endpoint: Endpoint::LoRaWan,
            kind: 0xEE,
        };
        assert_eq!(err.to_string(), "unknown message kind 0xEE on LoRaWAN");

        let err: SessionError<std::io::Error> = SessionError::RequestPending {
            endpoint: Endpoint::DevMgmt,
            kind: 0x01,
        };
        assert_eq!(err.to_string(), "request 0x01 on DevMgmt is still pending");
    }
}
