//! Status codes carried as the first octet of Configuration status messages.

/// Outcome reported by a Configuration Server.
///
/// Conversion from the wire octet is total: codes without an assigned meaning
/// (0x12 onwards) are kept as [`Status::Rfu`] rather than rejected, since a
/// node running newer firmware may legitimately report them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Success,
    InvalidAddress,
    InvalidModel,
    InvalidAppKeyIndex,
    InvalidNetKeyIndex,
    InsufficientResources,
    KeyIndexAlreadyStored,
    InvalidPublishParameters,
    NotASubscribeModel,
    StorageFailure,
    FeatureNotSupported,
    CannotUpdate,
    CannotRemove,
    CannotBind,
    TemporarilyUnableToChangeState,
    CannotSet,
    UnspecifiedError,
    InvalidBinding,
    Rfu(u8),
}

/// Resolve a raw status octet to its status and name.
pub fn lookup(code: u8) -> (Status, &'static str) {
    let status = Status::from(code);
    (status, status.name())
}

impl Status {
    pub fn code(&self) -> u8 {
        match self {
            Status::Success => 0x00,
            Status::InvalidAddress => 0x01,
            Status::InvalidModel => 0x02,
            Status::InvalidAppKeyIndex => 0x03,
            Status::InvalidNetKeyIndex => 0x04,
            Status::InsufficientResources => 0x05,
            Status::KeyIndexAlreadyStored => 0x06,
            Status::InvalidPublishParameters => 0x07,
            Status::NotASubscribeModel => 0x08,
            Status::StorageFailure => 0x09,
            Status::FeatureNotSupported => 0x0A,
            Status::CannotUpdate => 0x0B,
            Status::CannotRemove => 0x0C,
            Status::CannotBind => 0x0D,
            Status::TemporarilyUnableToChangeState => 0x0E,
            Status::CannotSet => 0x0F,
            Status::UnspecifiedError => 0x10,
            Status::InvalidBinding => 0x11,
            Status::Rfu(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::InvalidAddress => "Invalid Address",
            Status::InvalidModel => "Invalid Model",
            Status::InvalidAppKeyIndex => "Invalid AppKey Index",
            Status::InvalidNetKeyIndex => "Invalid NetKey Index",
            Status::InsufficientResources => "Insufficient Resources",
            Status::KeyIndexAlreadyStored => "Key Index Already Stored",
            Status::InvalidPublishParameters => "Invalid Publish Parameters",
            Status::NotASubscribeModel => "Not a Subscribe Model",
            Status::StorageFailure => "Storage Failure",
            Status::FeatureNotSupported => "Feature Not Supported",
            Status::CannotUpdate => "Cannot Update",
            Status::CannotRemove => "Cannot Remove",
            Status::CannotBind => "Cannot Bind",
            Status::TemporarilyUnableToChangeState => "Temporarily Unable to Change State",
            Status::CannotSet => "Cannot Set",
            Status::UnspecifiedError => "Unspecified Error",
            Status::InvalidBinding => "Invalid Binding",
            Status::Rfu(_) => "RFU",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        match code {
            0x00 => Status::Success,
            0x01 => Status::InvalidAddress,
            0x02 => Status::InvalidModel,
            0x03 => Status::InvalidAppKeyIndex,
            0x04 => Status::InvalidNetKeyIndex,
            0x05 => Status::InsufficientResources,
            0x06 => Status::KeyIndexAlreadyStored,
            0x07 => Status::InvalidPublishParameters,
            0x08 => Status::NotASubscribeModel,
            0x09 => Status::StorageFailure,
            0x0A => Status::FeatureNotSupported,
            0x0B => Status::CannotUpdate,
            0x0C => Status::CannotRemove,
            0x0D => Status::CannotBind,
            0x0E => Status::TemporarilyUnableToChangeState,
            0x0F => Status::CannotSet,
            0x10 => Status::UnspecifiedError,
            0x11 => Status::InvalidBinding,
            code => Status::Rfu(code),
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
