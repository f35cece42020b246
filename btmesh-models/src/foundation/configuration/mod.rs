use crate::foundation::configuration::app_key::{AppKeyStatusMessage, CONFIG_APPKEY_STATUS};
use crate::foundation::configuration::model_publication::{
    ModelPublicationStatusMessage, CONFIG_MODEL_PUBLICATION_STATUS,
};
use crate::{Message, Model, Status, MAX_PARAMETERS_LEN};
use btmesh_common::address::UnicastAddress;
use btmesh_common::opcode::Opcode;
use btmesh_common::{Aid, InsufficientBuffer, ModelIdentifier, ParseError};
use heapless::Vec;

pub mod app_key;
pub mod model_publication;
pub mod status;

pub const CONFIGURATION_SERVER: ModelIdentifier = ModelIdentifier::SIG(0x0000);
pub const CONFIGURATION_CLIENT: ModelIdentifier = ModelIdentifier::SIG(0x0001);

/// A status message sent by a Configuration Server in reply to a request.
pub trait StatusMessage: Sized {
    const OPCODE: Opcode;

    fn parse(parameters: &[u8]) -> Result<Self, ParseError>;

    fn status(&self) -> Status;
}

/// Access-layer context of an inbound message, supplied by the node/session layer.
pub trait NodeContext {
    /// Element address the message originated from.
    fn src(&self) -> UnicastAddress;

    /// `None` when the device key secured the message (AKF clear).
    fn akf_aid(&self) -> Option<Aid>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InboundStatusMetadata {
    src: UnicastAddress,
    akf_aid: Option<Aid>,
}

impl InboundStatusMetadata {
    pub fn new(src: UnicastAddress, akf_aid: Option<Aid>) -> Self {
        Self { src, akf_aid }
    }
}

impl NodeContext for InboundStatusMetadata {
    fn src(&self) -> UnicastAddress {
        self.src
    }

    fn akf_aid(&self) -> Option<Aid> {
        self.akf_aid
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationStatus {
    AppKey(AppKeyStatusMessage),
    ModelPublication(ModelPublicationStatusMessage),
}

impl ConfigurationStatus {
    pub fn status(&self) -> Status {
        match self {
            ConfigurationStatus::AppKey(inner) => inner.status(),
            ConfigurationStatus::ModelPublication(inner) => inner.status(),
        }
    }
}

impl Message for ConfigurationStatus {
    fn opcode(&self) -> Opcode {
        match self {
            ConfigurationStatus::AppKey(_) => CONFIG_APPKEY_STATUS,
            ConfigurationStatus::ModelPublication(_) => CONFIG_MODEL_PUBLICATION_STATUS,
        }
    }

    fn emit_parameters<const N: usize>(
        &self,
        xmit: &mut Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer> {
        match self {
            ConfigurationStatus::AppKey(inner) => inner.emit_parameters(xmit),
            ConfigurationStatus::ModelPublication(inner) => inner.emit_parameters(xmit),
        }
    }
}

impl From<AppKeyStatusMessage> for ConfigurationStatus {
    fn from(inner: AppKeyStatusMessage) -> Self {
        Self::AppKey(inner)
    }
}

impl From<ModelPublicationStatusMessage> for ConfigurationStatus {
    fn from(inner: ModelPublicationStatusMessage) -> Self {
        Self::ModelPublication(inner)
    }
}

type StatusParser = fn(&[u8]) -> Result<ConfigurationStatus, ParseError>;

fn parse_status<M: StatusMessage + Into<ConfigurationStatus>>(
    parameters: &[u8],
) -> Result<ConfigurationStatus, ParseError> {
    Ok(M::parse(parameters)?.into())
}

const STATUS_PARSERS: &[(Opcode, StatusParser)] = &[
    (
        AppKeyStatusMessage::OPCODE,
        parse_status::<AppKeyStatusMessage> as StatusParser,
    ),
    (
        ModelPublicationStatusMessage::OPCODE,
        parse_status::<ModelPublicationStatusMessage> as StatusParser,
    ),
];

/// A decoded status message together with the context it arrived in.
///
/// Built once by [`ConfigurationClient::decode`] and read-only afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationStatusMessage {
    src: UnicastAddress,
    akf_aid: Option<Aid>,
    parameters: Vec<u8, MAX_PARAMETERS_LEN>,
    message: ConfigurationStatus,
}

impl ConfigurationStatusMessage {
    pub fn src(&self) -> UnicastAddress {
        self.src
    }

    /// Whether an application key (rather than the device key) secured the message.
    pub fn akf(&self) -> bool {
        self.akf_aid.is_some()
    }

    pub fn aid(&self) -> Option<Aid> {
        self.akf_aid
    }

    /// The raw parameters the message was decoded from.
    pub fn parameters(&self) -> &[u8] {
        &self.parameters
    }

    pub fn opcode(&self) -> Opcode {
        self.message.opcode()
    }

    pub fn status(&self) -> Status {
        self.message.status()
    }

    pub fn status_code(&self) -> u8 {
        self.status().code()
    }

    pub fn status_code_name(&self) -> &'static str {
        self.status().name()
    }

    pub fn message(&self) -> &ConfigurationStatus {
        &self.message
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigurationClient;

impl Model for ConfigurationClient {
    const IDENTIFIER: ModelIdentifier = CONFIGURATION_CLIENT;
    const SUPPORTS_SUBSCRIPTION: bool = false;
    const SUPPORTS_PUBLICATION: bool = false;
    type Message = ConfigurationStatus;

    fn parse(opcode: &Opcode, parameters: &[u8]) -> Result<Option<Self::Message>, ParseError> {
        match STATUS_PARSERS
            .iter()
            .find(|(candidate, _)| candidate == opcode)
        {
            Some((_, parse)) => parse(parameters).map(Some),
            None => Ok(None),
        }
    }
}

impl ConfigurationClient {
    /// Decode the parameters of a status message received from `ctx`.
    ///
    /// Returns `Ok(None)` for opcodes that are not Configuration status messages.
    pub fn decode<C: NodeContext>(
        opcode: Opcode,
        ctx: &C,
        parameters: &[u8],
    ) -> Result<Option<ConfigurationStatusMessage>, ParseError> {
        let message = match Self::parse(&opcode, parameters) {
            Ok(Some(message)) => message,
            Ok(None) => {
                debug!("unhandled opcode {:?} from {:?}", opcode, ctx.src());
                return Ok(None);
            }
            Err(err) => {
                warn!(
                    "discarding status {:?} from {:?}: {:?}",
                    opcode,
                    ctx.src(),
                    err
                );
                return Err(err);
            }
        };

        Ok(Some(ConfigurationStatusMessage {
            src: ctx.src(),
            akf_aid: ctx.akf_aid(),
            parameters: Vec::from_slice(parameters)?,
            message,
        }))
    }

    /// Decode a complete access payload, opcode included.
    pub fn decode_access<C: NodeContext>(
        ctx: &C,
        payload: &[u8],
    ) -> Result<Option<ConfigurationStatusMessage>, ParseError> {
        let (opcode, parameters) = Opcode::split(payload).ok_or(ParseError::InvalidPDUFormat)?;
        Self::decode(opcode, ctx, parameters)
    }
}

// ------------------------------------------------------------------------
// ------------------------------------------------------------------------

/// A 12-bit global key index.
#[derive(PartialEq, Eq, PartialOrd, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct KeyIndex(u16);

#[cfg(feature = "defmt")]
impl defmt::Format for KeyIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0);
    }
}

impl KeyIndex {
    pub const MAX: u16 = 0x0FFF;

    pub fn new(index: u16) -> Self {
        Self(index & Self::MAX)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Index held in the low 12 bits of a little-endian octet pair.
    pub(crate) fn parse_lower(octets: [u8; 2]) -> Self {
        Self::new(u16::from_le_bytes(octets))
    }

    /// Index held in the high 12 bits of a little-endian octet pair.
    pub(crate) fn parse_upper(octets: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(octets) >> 4)
    }

    pub(crate) fn emit_lower(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub(crate) fn emit_upper(&self) -> [u8; 2] {
        (self.0 << 4).to_le_bytes()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Eq, PartialEq, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct NetKeyIndex(KeyIndex);

impl NetKeyIndex {
    pub fn new(index: u16) -> Self {
        Self(KeyIndex::new(index))
    }

    pub fn value(&self) -> u16 {
        self.0.value()
    }
}

impl From<NetKeyIndex> for usize {
    fn from(index: NetKeyIndex) -> Self {
        index.0 .0 as usize
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetKeyIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct AppKeyIndex(KeyIndex);

impl AppKeyIndex {
    pub fn new(index: u16) -> Self {
        Self(KeyIndex::new(index))
    }

    pub fn value(&self) -> u16 {
        self.0.value()
    }
}

impl From<AppKeyIndex> for usize {
    fn from(index: AppKeyIndex) -> Self {
        index.0 .0 as usize
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AppKeyIndex {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0)
    }
}
