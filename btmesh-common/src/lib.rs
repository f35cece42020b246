#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod opcode;

/// Error returned when emitting into a buffer without enough room left.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InsufficientBuffer;

impl From<()> for InsufficientBuffer {
    fn from(_: ()) -> Self {
        InsufficientBuffer
    }
}

impl From<u8> for InsufficientBuffer {
    fn from(_: u8) -> Self {
        InsufficientBuffer
    }
}

/// Reasons a PDU can be rejected while parsing.
///
/// A rejected PDU is discarded whole; no partially decoded value is ever produced.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The PDU framing itself is unusable (e.g. the opcode cannot be split off).
    InvalidPDUFormat,
    InvalidValue,
    /// The parameter length is not one of the lengths the message accepts.
    InvalidLength,
    InsufficientBuffer,
    /// Fewer octets than the message's fixed layout requires.
    TruncatedPdu,
}

impl From<()> for ParseError {
    fn from(_: ()) -> Self {
        Self::InsufficientBuffer
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidPDUFormat => f.write_str("invalid PDU format"),
            ParseError::InvalidValue => f.write_str("invalid value"),
            ParseError::InvalidLength => f.write_str("invalid length"),
            ParseError::InsufficientBuffer => f.write_str("insufficient buffer"),
            ParseError::TruncatedPdu => f.write_str("truncated PDU"),
        }
    }
}

/// Application key identifier.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aid(u8);

impl Aid {
    /// Parse the combined AKF/AID octet of a lower-transport access PDU.
    ///
    /// Returns `None` when AKF is clear, meaning the device key secured the message.
    pub fn parse(akf_aid: u8) -> Result<Option<Self>, ParseError> {
        let akf = akf_aid & 0b01000000 != 0;
        if akf {
            Ok(Some(Self(akf_aid & 0b00111111)))
        } else {
            Ok(None)
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<Aid> for u8 {
    fn from(aid: Aid) -> Self {
        aid.0
    }
}

impl From<u8> for Aid {
    fn from(val: u8) -> Self {
        Self(val & 0b00111111)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ttl(u8);

impl Ttl {
    pub fn new(ttl: u8) -> Self {
        Self(ttl)
    }

    pub fn parse(ttl: u8) -> Result<Ttl, ParseError> {
        Ok(Self(ttl))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Bluetooth SIG assigned company identifier.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanyIdentifier(pub u16);

/// Identifies a model either by its 16-bit SIG assigned number,
/// or by a company identifier plus a 16-bit vendor-assigned number.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelIdentifier {
    SIG(u16),
    Vendor(CompanyIdentifier, u16),
}

impl ModelIdentifier {
    /// Width in bits of the identifier on the wire.
    pub fn width(&self) -> u8 {
        match self {
            ModelIdentifier::SIG(_) => 16,
            ModelIdentifier::Vendor(..) => 32,
        }
    }

    /// The identifier as a single number, company identifier in the upper half for vendor models.
    pub fn value(&self) -> u32 {
        match self {
            ModelIdentifier::SIG(model_id) => *model_id as u32,
            ModelIdentifier::Vendor(CompanyIdentifier(company_id), model_id) => {
                (*company_id as u32) << 16 | *model_id as u32
            }
        }
    }

    /// Parse a 2 octet SIG or 4 octet vendor identifier, each half little-endian.
    pub fn parse(parameters: &[u8]) -> Result<Self, ParseError> {
        match parameters.len() {
            2 => Ok(Self::SIG(u16::from_le_bytes([parameters[0], parameters[1]]))),
            4 => Ok(Self::Vendor(
                CompanyIdentifier(u16::from_le_bytes([parameters[0], parameters[1]])),
                u16::from_le_bytes([parameters[2], parameters[3]]),
            )),
            _ => Err(ParseError::InvalidLength),
        }
    }

    pub fn emit<const N: usize>(
        &self,
        xmit: &mut heapless::Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer> {
        match self {
            ModelIdentifier::SIG(model_id) => {
                xmit.extend_from_slice(&model_id.to_le_bytes())?;
            }
            ModelIdentifier::Vendor(CompanyIdentifier(company_id), model_id) => {
                xmit.extend_from_slice(&company_id.to_le_bytes())?;
                xmit.extend_from_slice(&model_id.to_le_bytes())?;
            }
        }
        Ok(())
    }
}
