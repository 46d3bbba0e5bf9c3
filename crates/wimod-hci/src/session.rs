//! Request/response session over a caller-supplied transport.
//!
//! HCI messages carry no correlation id, so a response can only be matched
//! to the request that is currently outstanding. [`HciSession`] enforces at
//! most one outstanding request: a new request is refused until the
//! response kind of the previous one arrives on the same endpoint, or the
//! caller abandons it. Indications are decoded and handed back without
//! affecting the pending request.
//!
//! Framing, serial I/O and timeouts belong to the transport and the caller.

use crate::commands::{self, response_kind, Request};
use crate::config::HciConfig;
use crate::envelope::Envelope;
use crate::error::SessionError;
use crate::responses::Message;
use crate::types::Endpoint;

/// Sends encoded envelopes towards the module.
pub trait Transport {
    /// Transport specific error.
    type Error;

    /// Send one envelope.
    fn send(&mut self, envelope: &Envelope) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, envelope: &Envelope) -> Result<(), Self::Error> {
        (**self).send(envelope)
    }
}

/// A request that has been sent and not yet answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    /// Endpoint the request went to.
    pub endpoint: Endpoint,
    /// Request kind.
    pub kind: u8,
}

impl PendingRequest {
    /// Whether `envelope` is the response to this request.
    pub fn is_answered_by(&self, envelope: &Envelope) -> bool {
        envelope.endpoint() == self.endpoint && envelope.kind() == response_kind(self.kind)
    }
}

/// Serialized request session.
pub struct HciSession<T: Transport> {
    transport: T,
    config: HciConfig,
    pending: Option<PendingRequest>,
}

impl<T: Transport> HciSession<T> {
    /// Create a session over `transport`.
    pub fn new(transport: T, config: HciConfig) -> Self {
        HciSession {
            transport,
            config,
            pending: None,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &HciConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the session and return the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<PendingRequest> {
        self.pending
    }

    /// Encode and send a typed request.
    pub fn request(&mut self, request: impl Into<Request>) -> Result<(), SessionError<T::Error>> {
        self.check_idle()?;
        let envelope = request.into().encode(&self.config)?;
        self.send(envelope)
    }

    /// Encode and send a request from raw argument bytes.
    pub fn request_raw(
        &mut self,
        endpoint: Endpoint,
        kind: u8,
        args: &[u8],
    ) -> Result<(), SessionError<T::Error>> {
        self.check_idle()?;
        let envelope = commands::encode(endpoint, kind, args, &self.config)?;
        self.send(envelope)
    }

    /// Decode one inbound envelope.
    ///
    /// The pending request is released as soon as its response arrives,
    /// even if that response fails to decode.
    pub fn deliver(&mut self, envelope: Envelope) -> Result<Message, SessionError<T::Error>> {
        if let Some(pending) = self.pending {
            if pending.is_answered_by(&envelope) {
                log::trace!(
                    "response 0x{:02X} answers pending {} request",
                    envelope.kind(),
                    pending.endpoint
                );
                self.pending = None;
            }
        }
        Ok(Message::decode(&envelope)?)
    }

    /// Parse a de-framed HCI message and decode it.
    pub fn deliver_frame(&mut self, frame: &[u8]) -> Result<Message, SessionError<T::Error>> {
        let envelope = Envelope::from_wire(frame, self.config.payload_capacity)?;
        self.deliver(envelope)
    }

    /// Decode one inbound envelope and hand the result to `consumer`.
    ///
    /// Decode failures are logged and returned; the consumer only sees
    /// successfully decoded messages.
    pub fn process<F>(&mut self, envelope: Envelope, consumer: &mut F) -> Result<(), SessionError<T::Error>>
    where
        F: FnMut(Message),
    {
        match self.deliver(envelope) {
            Ok(message) => {
                consumer(message);
                Ok(())
            }
            Err(err) => {
                if let Some(codec) = err.codec_error() {
                    log::warn!("dropping inbound message: {}", codec);
                }
                Err(err)
            }
        }
    }

    /// Forget the outstanding request, e.g. after the caller timed out.
    pub fn abandon_pending(&mut self) -> Option<PendingRequest> {
        let pending = self.pending.take();
        if let Some(pending) = pending {
            log::debug!(
                "abandoned pending {} request 0x{:02X}",
                pending.endpoint,
                pending.kind
            );
        }
        pending
    }

    fn check_idle(&self) -> Result<(), SessionError<T::Error>> {
        match self.pending {
            Some(PendingRequest { endpoint, kind }) => {
                Err(SessionError::RequestPending { endpoint, kind })
            }
            None => Ok(()),
        }
    }

    fn send(&mut self, envelope: Envelope) -> Result<(), SessionError<T::Error>> {
        self.transport
            .send(&envelope)
            .map_err(SessionError::Transport)?;
        self.pending = Some(PendingRequest {
            endpoint: envelope.endpoint(),
            kind: envelope.kind(),
        });
        Ok(())
    }
}

impl<T: Transport> std::fmt::Debug for HciSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HciSession")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DevMgmtRequest;
    use crate::constants::*;
    use crate::error::HciError;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<Vec<u8>>,
    }

    impl Transport for Recorder {
        type Error = std::convert::Infallible;

        fn send(&mut self, envelope: &Envelope) -> Result<(), Self::Error> {
            self.sent.push(envelope.to_wire());
            Ok(())
        }
    }

    /// Transport whose error type has no `Display` impl.
    struct Opaque;

    impl Transport for Opaque {
        type Error = ();

        fn send(&mut self, _envelope: &Envelope) -> Result<(), Self::Error> {
            Err(())
        }
    }

    #[test]
    fn test_process_with_opaque_transport_error() {
        let mut session = HciSession::new(Opaque, HciConfig::default());
        let mut seen = Vec::new();

        let ping = Envelope::from_wire(&[DEVMGMT_SAP_ID, DEVMGMT_MSG_PING_RSP, 0x00], 300).unwrap();
        session.process(ping, &mut |message| seen.push(message)).unwrap();
        assert_eq!(seen.len(), 1);

        let unknown = Envelope::from_wire(&[DEVMGMT_SAP_ID, 0x7F], 300).unwrap();
        let err = session
            .process(unknown, &mut |message| seen.push(message))
            .unwrap_err();
        assert!(matches!(err, SessionError::Codec(HciError::UnknownKind { kind: 0x7F, .. })));
        assert_eq!(seen.len(), 1);

        assert!(matches!(
            session.request(DevMgmtRequest::Ping),
            Err(SessionError::Transport(()))
        ));
    }

    #[test]
    fn test_pending_cleared_by_response() {
        let mut session = HciSession::new(Recorder::default(), HciConfig::default());
        session.request(DevMgmtRequest::Ping).unwrap();
        assert_eq!(
            session.pending(),
            Some(PendingRequest {
                endpoint: Endpoint::DevMgmt,
                kind: DEVMGMT_MSG_PING_REQ
            })
        );

        session.deliver_frame(&[DEVMGMT_SAP_ID, DEVMGMT_MSG_PING_RSP, 0x00]).unwrap();
        assert!(session.pending().is_none());
        assert_eq!(session.transport().sent, vec![vec![0x01, 0x01]]);
    }

    #[test]
    fn test_second_request_refused() {
        let mut session = HciSession::new(Recorder::default(), HciConfig::default());
        session.request(DevMgmtRequest::GetRtc).unwrap();
        let err = session.request(DevMgmtRequest::Ping).unwrap_err();
        assert!(matches!(
            err,
            SessionError::RequestPending {
                endpoint: Endpoint::DevMgmt,
                kind: DEVMGMT_MSG_GET_RTC_REQ
            }
        ));
        assert_eq!(session.transport().sent.len(), 1);

        assert!(session.abandon_pending().is_some());
        session.request(DevMgmtRequest::Ping).unwrap();
    }

    #[test]
    fn test_encode_failure_leaves_session_idle() {
        let mut session = HciSession::new(Recorder::default(), HciConfig::default());
        let err = session.request_raw(Endpoint::DevMgmt, 0x02, &[]).unwrap_err();
        assert_eq!(
            err.codec_error(),
            Some(&HciError::UnsupportedKind {
                endpoint: Endpoint::DevMgmt,
                kind: 0x02
            })
        );
        assert!(session.pending().is_none());
        assert!(session.transport().sent.is_empty());
    }
}
