#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod foundation;

use btmesh_common::opcode::Opcode;
use btmesh_common::{InsufficientBuffer, ModelIdentifier, ParseError};
use heapless::Vec;

pub use foundation::configuration::status::Status;

/// Largest access-layer parameter block a message can carry.
pub const MAX_PARAMETERS_LEN: usize = 379;

#[cfg(feature = "defmt")]
pub trait Message: defmt::Format {
    fn opcode(&self) -> Opcode;
    fn emit_parameters<const N: usize>(
        &self,
        xmit: &mut Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer>;
}

#[cfg(not(feature = "defmt"))]
pub trait Message {
    fn opcode(&self) -> Opcode;
    fn emit_parameters<const N: usize>(
        &self,
        xmit: &mut Vec<u8, N>,
    ) -> Result<(), InsufficientBuffer>;
}

pub trait Model {
    const IDENTIFIER: ModelIdentifier;
    const SUPPORTS_SUBSCRIPTION: bool = true;
    const SUPPORTS_PUBLICATION: bool = true;
    type Message: Message;

    /// Parse the parameters of a message addressed to this model.
    ///
    /// `Ok(None)` means the opcode is not one this model handles.
    fn parse(opcode: &Opcode, parameters: &[u8]) -> Result<Option<Self::Message>, ParseError>;
}
