use crate::foundation::configuration::{AppKeyIndex, KeyIndex, StatusMessage};
use crate::{Message, Status};
use btmesh_common::address::{Address, InvalidAddress, UnicastAddress};
use btmesh_common::opcode::Opcode;
use btmesh_common::{opcode, InsufficientBuffer, ModelIdentifier, ParseError, Ttl};
use heapless::Vec;

opcode!( CONFIG_MODEL_PUBLICATION_STATUS 0x80, 0x19 );

const CONFIG_MODEL_PUBLICATION_STATUS_SIG_MODEL_PDU_LENGTH: usize = 14;
const CONFIG_MODEL_PUBLICATION_STATUS_VENDOR_MODEL_PDU_LENGTH: usize = 16;

const MODEL_IDENTIFIER_OFFSET: usize = 12;

/// Config Model Publication Status: the publication state of one model.
///
/// The model identifier is 16-bit (SIG) or 32-bit (Vendor) depending solely
/// on the parameter length.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelPublicationStatusMessage {
    status: Status,
    element_address: u16,
    publish_address: [u8; 2],
    app_key_index: AppKeyIndex,
    credential_flag: bool,
    publish_ttl: u8,
    publish_period: PublishPeriod,
    publish_retransmit_count: u8,
    publish_retransmit_interval_steps: u8,
    model_identifier: ModelIdentifier,
}

impl ModelPublicationStatusMessage {
    pub fn element_address(&self) -> u16 {
        self.element_address
    }

    pub fn element_unicast_address(&self) -> Result<UnicastAddress, InvalidAddress> {
        UnicastAddress::new(self.element_address)
    }

    /// Publish address octets exactly as carried on the wire.
    pub fn publish_address_bytes(&self) -> [u8; 2] {
        self.publish_address
    }

    pub fn publish_address(&self) -> Address {
        Address::parse_le(self.publish_address)
    }

    pub fn app_key_index(&self) -> AppKeyIndex {
        self.app_key_index
    }

    pub fn credential_flag(&self) -> bool {
        self.credential_flag
    }

    pub fn publish_ttl(&self) -> u8 {
        self.publish_ttl
    }

    /// `None` when the node publishes with its default TTL.
    pub fn publish_ttl_value(&self) -> Option<Ttl> {
        if self.publish_ttl == 0xFF {
            None
        } else {
            Some(Ttl::new(self.publish_ttl))
        }
    }

    pub fn publish_period(&self) -> PublishPeriod {
        self.publish_period
    }

    pub fn publish_retransmit_count(&self) -> u8 {
        self.publish_retransmit_count
    }

    pub fn publish_retransmit_interval_steps(&self) -> u8 {
        self.publish_retransmit_interval_steps
    }

    pub fn model_identifier(&self) -> ModelIdentifier {
        self.model_identifier
    }

    pub fn model_identifier_width(&self) -> u8 {
        self.model_identifier.width()
    }
}

impl StatusMessage for ModelPublicationStatusMessage {
    const OPCODE: Opcode = CONFIG_MODEL_PUBLICATION_STATUS;

    fn parse(parameters: &[u8]) -> Result<Self, ParseError> {
        match parameters.len() {
            CONFIG_MODEL_PUBLICATION_STATUS_SIG_MODEL_PDU_LENGTH
            | CONFIG_MODEL_PUBLICATION_STATUS_VENDOR_MODEL_PDU_LENGTH => {}
            _ => return Err(ParseError::InvalidLength),
        }

        let status = Status::from(parameters[0]);
        let element_address = u16::from_le_bytes([parameters[1], parameters[2]]);
        let publish_address = [parameters[3], parameters[4]];
        let app_key_index = AppKeyIndex(KeyIndex::parse_lower([parameters[5], parameters[6]]));
        let credential_flag = (parameters[6] & 0b00010000) != 0;
        let publish_ttl = parameters[7];
        let publish_period = PublishPeriod::from(parameters[8]);
        let publish_retransmit_count = parameters[9] >> 5;
        let publish_retransmit_interval_steps = parameters[11] & 0b00011111;
        let model_identifier = ModelIdentifier::parse(&parameters[MODEL_IDENTIFIER_OFFSET..])?;

        trace!(
            "model publication status: {:?} element={:?} publish={:?} app_key_index={} credential={} ttl={} period={:?} retransmit={}x{} model={:?}",
            status,
            element_address,
            publish_address,
            app_key_index.value(),
            credential_flag,
            publish_ttl,
            publish_period,
            publish_retransmit_count,
            publish_retransmit_interval_steps,
            model_identifier
        );

        Ok(Self {
            status,
            element_address,
            publish_address,
            app_key_index,
            credential_flag,
            publish_ttl,
            publish_period,
            publish_retransmit_count,
            publish_retransmit_interval_steps,
            model_identifier,
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl Message for ModelPublicationStatusMessage {
    fn opcode(&self) -> Opcode {
        CONFIG_MODEL_PUBLICATION_STATUS
    }

    /// Emits the canonical form; octet 10 and other unused bits are zero.
    fn emit_parameters<const N: usize>(
        &self,
        xmit: &mut Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer> {
        xmit.push(self.status.code())?;
        xmit.extend_from_slice(&self.element_address.to_le_bytes())?;
        xmit.extend_from_slice(&self.publish_address)?;
        let mut app_key_index = self.app_key_index.0.emit_lower();
        if self.credential_flag {
            app_key_index[1] |= 0b00010000;
        }
        xmit.extend_from_slice(&app_key_index)?;
        xmit.push(self.publish_ttl)?;
        xmit.push(u8::from(self.publish_period))?;
        xmit.push(self.publish_retransmit_count << 5)?;
        xmit.push(0)?;
        xmit.push(self.publish_retransmit_interval_steps & 0b00011111)?;
        self.model_identifier.emit(xmit)?;
        Ok(())
    }
}

#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Copy, Clone, Eq, Debug, PartialEq, Hash)]
pub enum Resolution {
    Milliseconds100 = 0b00,
    Seconds1 = 0b01,
    Seconds10 = 0b10,
    Minutes10 = 0b11,
}

impl Resolution {
    pub fn as_millis(&self) -> u32 {
        match self {
            Resolution::Milliseconds100 => 100,
            Resolution::Seconds1 => 1_000,
            Resolution::Seconds10 => 10_000,
            Resolution::Minutes10 => 600_000,
        }
    }
}

/// Publish period: 6-bit step count and 2-bit step resolution packed in one octet.
#[cfg_attr(feature = "defmt", derive(::defmt::Format))]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Copy, Clone, Eq, Debug, PartialEq, Hash)]
pub struct PublishPeriod {
    period: u8,
}

impl PublishPeriod {
    pub fn new(steps: u8, resolution: Resolution) -> Self {
        Self {
            period: steps << 2 | resolution as u8,
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self.period & 0b11 {
            0b00 => Resolution::Milliseconds100,
            0b01 => Resolution::Seconds1,
            0b10 => Resolution::Seconds10,
            _ => Resolution::Minutes10,
        }
    }

    pub fn steps(&self) -> u8 {
        (self.period & 0b11111100) >> 2
    }

    /// Zero when periodic publishing is disabled.
    pub fn as_millis(&self) -> u32 {
        self.steps() as u32 * self.resolution().as_millis()
    }
}

impl From<PublishPeriod> for u8 {
    fn from(val: PublishPeriod) -> Self {
        val.period
    }
}

impl From<u8> for PublishPeriod {
    fn from(period: u8) -> Self {
        Self { period }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btmesh_common::address::GroupAddress;
    use btmesh_common::CompanyIdentifier;

    const SIG_STATUS: [u8; 14] = [
        0x00, // status
        0x01, 0x02, // element address
        0x05, 0xC0, // publish address
        0x23, 0x11, // app key index 0x123, credential flag
        0x07, // ttl
        0x29, // period
        0b101_00000, // retransmit count
        0x00, // rfu
        0b000_10011, // retransmit interval steps
        0x00, 0x13, // model identifier
    ];

    #[test]
    fn test_parse_sig_model() {
        let parsed = ModelPublicationStatusMessage::parse(&SIG_STATUS).unwrap();
        assert_eq!(parsed.status(), Status::Success);
        assert_eq!(parsed.element_address(), 0x0201);
        assert_eq!(
            parsed.element_unicast_address(),
            Ok(UnicastAddress::new(0x0201).unwrap())
        );
        assert_eq!(parsed.publish_address_bytes(), [0x05, 0xC0]);
        assert_eq!(
            parsed.publish_address(),
            Address::Group(GroupAddress::Normal(0xC005))
        );
        assert_eq!(parsed.app_key_index().value(), 0x0123);
        assert!(parsed.credential_flag());
        assert_eq!(parsed.publish_ttl(), 0x07);
        assert_eq!(parsed.publish_ttl_value(), Some(Ttl::new(7)));
        assert_eq!(parsed.publish_period().steps(), 10);
        assert_eq!(parsed.publish_period().resolution(), Resolution::Seconds1);
        assert_eq!(parsed.publish_retransmit_count(), 5);
        assert_eq!(parsed.publish_retransmit_interval_steps(), 0b10011);
        assert_eq!(parsed.model_identifier(), ModelIdentifier::SIG(0x1300));
        assert_eq!(parsed.model_identifier_width(), 16);
    }

    #[test]
    fn test_parse_vendor_model() {
        let mut parameters = [0u8; 16];
        parameters[..14].copy_from_slice(&SIG_STATUS);
        parameters[0] = 0x02;
        parameters[6] = 0x01;
        parameters[7] = 0xFF;
        parameters[12..].copy_from_slice(&[0x59, 0x00, 0x34, 0x12]);

        let parsed = ModelPublicationStatusMessage::parse(&parameters).unwrap();
        assert_eq!(parsed.status(), Status::InvalidModel);
        assert!(!parsed.credential_flag());
        assert_eq!(parsed.app_key_index().value(), 0x0123);
        assert_eq!(parsed.publish_ttl_value(), None);
        assert_eq!(
            parsed.model_identifier(),
            ModelIdentifier::Vendor(CompanyIdentifier(0x0059), 0x1234)
        );
        assert_eq!(parsed.model_identifier().value(), 0x0059_1234);
        assert_eq!(parsed.model_identifier_width(), 32);
    }

    #[test]
    fn test_parse_rejects_other_lengths() {
        for len in (0..=20).filter(|len| *len != 14 && *len != 16) {
            let parameters = [0u8; 20];
            assert_eq!(
                ModelPublicationStatusMessage::parse(&parameters[..len]),
                Err(ParseError::InvalidLength)
            );
        }
    }

    #[test]
    fn test_canonical_emit() {
        let parsed = ModelPublicationStatusMessage::parse(&SIG_STATUS).unwrap();
        let mut xmit: Vec<u8, 16> = Vec::new();
        parsed.emit_parameters(&mut xmit).unwrap();
        assert_eq!(&xmit[..], &SIG_STATUS[..]);

        let reparsed = ModelPublicationStatusMessage::parse(&xmit).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_publish_period() {
        let period1 = PublishPeriod::new(20, Resolution::Seconds1);
        assert_eq!(0x51, u8::from(period1));
        assert_eq!(20_000, period1.as_millis());

        let period2 = PublishPeriod::from(0x29);
        assert_eq!(10, period2.steps());
        assert_eq!(Resolution::Seconds1, period2.resolution());

        let period3 = PublishPeriod::from(0x03);
        assert_eq!(0, period3.steps());
        assert_eq!(Resolution::Minutes10, period3.resolution());
        assert_eq!(0, period3.as_millis());
    }
}
