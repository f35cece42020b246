use crate::foundation::configuration::{AppKeyIndex, KeyIndex, NetKeyIndex, StatusMessage};
use crate::{Message, Status};
use btmesh_common::opcode::Opcode;
use btmesh_common::{opcode, InsufficientBuffer, ParseError};
use heapless::Vec;

opcode!( CONFIG_APPKEY_STATUS 0x80, 0x03 );

const CONFIG_APPKEY_STATUS_PDU_LENGTH: usize = 5;

/// Config AppKey Status: the outcome of an AppKey Add, Update or Delete.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppKeyStatusMessage {
    status: Status,
    net_key_index: NetKeyIndex,
    app_key_index: AppKeyIndex,
}

impl AppKeyStatusMessage {
    pub fn new(status: Status, net_key_index: NetKeyIndex, app_key_index: AppKeyIndex) -> Self {
        Self {
            status,
            net_key_index,
            app_key_index,
        }
    }

    pub fn net_key_index(&self) -> NetKeyIndex {
        self.net_key_index
    }

    pub fn app_key_index(&self) -> AppKeyIndex {
        self.app_key_index
    }
}

impl StatusMessage for AppKeyStatusMessage {
    const OPCODE: Opcode = CONFIG_APPKEY_STATUS;

    fn parse(parameters: &[u8]) -> Result<Self, ParseError> {
        if parameters.len() < CONFIG_APPKEY_STATUS_PDU_LENGTH {
            return Err(ParseError::TruncatedPdu);
        }
        if parameters.len() > CONFIG_APPKEY_STATUS_PDU_LENGTH {
            return Err(ParseError::InvalidLength);
        }

        let status = Status::from(parameters[0]);
        let net_key_index = NetKeyIndex(KeyIndex::parse_lower([parameters[1], parameters[2]]));
        let app_key_index = AppKeyIndex(KeyIndex::parse_upper([parameters[3], parameters[4]]));

        trace!(
            "appkey status: {:?} net_key_index={} app_key_index={}",
            status,
            net_key_index.value(),
            app_key_index.value()
        );

        Ok(Self {
            status,
            net_key_index,
            app_key_index,
        })
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl Message for AppKeyStatusMessage {
    fn opcode(&self) -> Opcode {
        CONFIG_APPKEY_STATUS
    }

    fn emit_parameters<const N: usize>(
        &self,
        xmit: &mut Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer> {
        xmit.push(self.status.code())?;
        xmit.extend_from_slice(&self.net_key_index.0.emit_lower())?;
        xmit.extend_from_slice(&self.app_key_index.0.emit_upper())?;
        Ok(())
    }
}
