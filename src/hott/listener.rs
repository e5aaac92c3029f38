//! # HoTT Request Listener
//!
//! Turns one inbound poll frame into at most one reply packet.
//!
//! A binary poll is two or three bytes: `0x80` followed by the module address
//! (some receivers send a trailing byte). Text-mode polls (`0x7F`) are
//! recognised but never answered. Anything else on the wire, including the
//! echo of our own 45-byte replies on a half-duplex line, is ignored.

use std::sync::Arc;

use tracing::trace;

use super::activity::ActivityIndicator;
use super::climb::ClimbRates;
use super::encoder::{ElectricAirEncoder, EscEncoder, GpsEncoder, PacketEncoder, VarioEncoder};
use super::protocol::*;
use crate::sensors::SensorRegistry;

/// Classify a frame as a binary or text-mode poll
///
/// # Arguments
///
/// * `frame` - Bytes received between two idle gaps
///
/// # Returns
///
/// * `Some(RequestKind)` - A 2 or 3 byte frame starting with a poll id
/// * `None` - Anything else
pub fn classify_request(frame: &[u8]) -> Option<RequestKind> {
    if !(HOTT_REQUEST_MIN_LENGTH..=HOTT_REQUEST_MAX_LENGTH).contains(&frame.len()) {
        return None;
    }

    match frame[0] {
        HOTT_BINARY_MODE_REQUEST_ID => Some(RequestKind::Binary(frame[1])),
        HOTT_TEXT_MODE_REQUEST_ID => Some(RequestKind::Text(frame[1])),
        _ => None,
    }
}

/// Extract the module address from a binary poll
///
/// # Arguments
///
/// * `frame` - Bytes received between two idle gaps
///
/// # Returns
///
/// * `Some(u8)` - The polled module address
/// * `None` - Text-mode polls and malformed frames
pub fn parse_request(frame: &[u8]) -> Option<u8> {
    match classify_request(frame)? {
        RequestKind::Binary(address) => Some(address),
        RequestKind::Text(_) => None,
    }
}

/// Owns the registry and one encoder per module
pub struct Responder<A: ActivityIndicator> {
    registry: SensorRegistry,
    vario: VarioEncoder,
    esc: EscEncoder,
    electric_air: ElectricAirEncoder,
    gps: GpsEncoder,
    activity: A,
}

impl<A: ActivityIndicator> Responder<A> {
    pub fn new(registry: SensorRegistry, climb: Arc<ClimbRates>, activity: A) -> Self {
        Self {
            registry,
            vario: VarioEncoder::new(climb),
            esc: EscEncoder::new(),
            electric_air: ElectricAirEncoder::new(),
            gps: GpsEncoder::new(),
            activity,
        }
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Answer one poll frame
    ///
    /// # Arguments
    ///
    /// * `frame` - Bytes received between two idle gaps
    ///
    /// # Returns
    ///
    /// * `Some(Vec<u8>)` - The 45-byte reply for an enabled module
    /// * `None` - Unknown or disabled modules, text-mode polls and malformed frames
    pub fn handle(&mut self, frame: &[u8]) -> Option<Vec<u8>> {
        let address = match classify_request(frame) {
            Some(RequestKind::Binary(address)) => address,
            Some(RequestKind::Text(address)) => {
                trace!("Text-mode request 0x{:02X} not answered", address);
                return None;
            }
            None => {
                trace!("Ignoring {}-byte frame: {:02X?}", frame.len(), frame);
                return None;
            }
        };

        let Some(module) = Module::from_address(address) else {
            trace!("Request for unknown module 0x{:02X}", address);
            return None;
        };

        let Self {
            registry,
            vario,
            esc,
            electric_air,
            gps,
            activity,
        } = self;
        let encoder: &mut dyn PacketEncoder = match module {
            Module::Vario => vario,
            Module::Esc => esc,
            Module::ElectricAir => electric_air,
            Module::Gps => gps,
        };

        let Some(reply) = encoder.respond(registry) else {
            trace!("{} module disabled, request ignored", module);
            return None;
        };

        trace!("{} reply: {:02X?}", module, reply);
        activity.reply_sent(module);
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hott::activity::{MockActivityIndicator, NoActivity};
    use crate::hott::checksum::checksum;
    use crate::sensors::registry::{EscSensors, GpsSensors, VarioSensors};
    use crate::sensors::slot::slot;
    use mockall::predicate::eq;

    fn vario_registry(altitude: f32) -> SensorRegistry {
        let (_writer, reader) = slot(altitude);
        SensorRegistry::new().with_vario(VarioSensors {
            altitude: Some(reader),
        })
    }

    #[test]
    fn test_parse_request_binary() {
        assert_eq!(parse_request(&[0x80, 0x89]), Some(0x89));
        assert_eq!(parse_request(&[0x80, 0x8C, 0x00]), Some(0x8C));
    }

    #[test]
    fn test_parse_request_rejects_bad_length() {
        assert_eq!(parse_request(&[]), None);
        assert_eq!(parse_request(&[0x80]), None);
        assert_eq!(parse_request(&[0x80, 0x89, 0x00, 0x00]), None);
        assert_eq!(parse_request(&[0u8; 45]), None);
    }

    #[test]
    fn test_parse_request_rejects_other_lead_bytes() {
        assert_eq!(parse_request(&[0x81, 0x89]), None);
        assert_eq!(parse_request(&[0x00, 0x89]), None);
        assert_eq!(parse_request(&[0x7F, 0xE0]), None);
    }

    #[test]
    fn test_classify_text_mode() {
        assert_eq!(classify_request(&[0x7F, 0xE0]), Some(RequestKind::Text(0xE0)));
        assert_eq!(classify_request(&[0x80, 0x8A]), Some(RequestKind::Binary(0x8A)));
        assert_eq!(classify_request(&[0x55, 0x8A]), None);
    }

    #[test]
    fn test_vario_reply_end_to_end() {
        let mut responder =
            Responder::new(vario_registry(0.0), Arc::new(ClimbRates::new()), NoActivity);

        let reply = responder.handle(&[0x80, 0x89]).unwrap();

        assert_eq!(reply.len(), 45);
        assert_eq!(&reply[..4], &[0x7C, 0x89, 0x00, 0x90]);
        assert_eq!(&reply[5..7], &[0xF4, 0x01]);
        assert_eq!(&reply[7..9], &[0xF4, 0x01]);
        assert_eq!(&reply[9..11], &[0xF4, 0x01]);
        assert_eq!(&reply[11..13], &[0x30, 0x75]);
        assert_eq!(reply[43], 0x7D);
        assert_eq!(reply[44], 0xE0);
        assert_eq!(reply[44], checksum(&reply[..44]));
    }

    #[test]
    fn test_three_byte_poll_is_answered() {
        let mut responder =
            Responder::new(vario_registry(10.0), Arc::new(ClimbRates::new()), NoActivity);
        let reply = responder.handle(&[0x80, 0x89, 0x00]).unwrap();
        assert_eq!(&reply[5..7], &[0xFE, 0x01]);
    }

    #[test]
    fn test_disabled_module_not_answered() {
        let registry = SensorRegistry::new().with_esc(EscSensors::default());
        let mut activity = MockActivityIndicator::new();
        activity.expect_reply_sent().never();

        let mut responder = Responder::new(registry, Arc::new(ClimbRates::new()), activity);
        assert!(responder.handle(&[0x80, 0x89]).is_none());
    }

    #[test]
    fn test_unknown_address_not_answered() {
        let mut activity = MockActivityIndicator::new();
        activity.expect_reply_sent().never();

        let mut responder =
            Responder::new(vario_registry(0.0), Arc::new(ClimbRates::new()), activity);
        assert!(responder.handle(&[0x80, 0x8D]).is_none());
        assert!(responder.handle(&[0x80, 0x00]).is_none());
    }

    #[test]
    fn test_text_mode_not_answered() {
        let mut activity = MockActivityIndicator::new();
        activity.expect_reply_sent().never();

        let mut responder =
            Responder::new(vario_registry(0.0), Arc::new(ClimbRates::new()), activity);
        assert!(responder.handle(&[0x7F, 0x90]).is_none());
    }

    #[test]
    fn test_own_echo_ignored() {
        let mut responder =
            Responder::new(vario_registry(0.0), Arc::new(ClimbRates::new()), NoActivity);
        let reply = responder.handle(&[0x80, 0x89]).unwrap();
        assert!(responder.handle(&reply).is_none());
    }

    #[test]
    fn test_activity_signalled_once_per_reply() {
        let registry = SensorRegistry::new()
            .with_vario(VarioSensors::default())
            .with_gps(GpsSensors::default());

        let mut activity = MockActivityIndicator::new();
        activity
            .expect_reply_sent()
            .with(eq(Module::Vario))
            .times(2)
            .return_const(());
        activity
            .expect_reply_sent()
            .with(eq(Module::Gps))
            .times(1)
            .return_const(());

        let mut responder = Responder::new(registry, Arc::new(ClimbRates::new()), activity);
        assert!(responder.handle(&[0x80, 0x89]).is_some());
        assert!(responder.handle(&[0x80, 0x8A]).is_some());
        assert!(responder.handle(&[0x80, 0x89]).is_some());
        assert!(responder.handle(&[0x80, 0x8C]).is_none());
    }

    #[test]
    fn test_extrema_persist_across_polls() {
        let (altitude, reader) = slot(100.0f32);
        let registry = SensorRegistry::new().with_vario(VarioSensors {
            altitude: Some(reader),
        });
        let mut responder = Responder::new(registry, Arc::new(ClimbRates::new()), NoActivity);

        responder.handle(&[0x80, 0x89]);
        altitude.set(20.0);
        let reply = responder.handle(&[0x80, 0x89]).unwrap();

        // altitude 520, max 600, min 520
        assert_eq!(&reply[5..7], &520u16.to_le_bytes());
        assert_eq!(&reply[7..9], &600u16.to_le_bytes());
        assert_eq!(&reply[9..11], &520u16.to_le_bytes());
    }
}
