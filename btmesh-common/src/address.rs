use crate::ParseError;

/// Indicates an invalid address.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress;

impl From<InvalidAddress> for ParseError {
    fn from(_: InvalidAddress) -> Self {
        ParseError::InvalidValue
    }
}

/// Any address a mesh message may carry, classified by its bit-pattern.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Address {
    Unassigned,
    Unicast(UnicastAddress),
    Virtual(VirtualAddress),
    Group(GroupAddress),
}

impl Address {
    /// Big-endian 2-byte representation.
    pub fn as_bytes(&self) -> [u8; 2] {
        match self {
            Address::Unassigned => [0, 0],
            Address::Unicast(inner) => inner.as_bytes(),
            Address::Virtual(inner) => inner.as_bytes(),
            Address::Group(inner) => inner.as_bytes(),
        }
    }

    /// Classify a big-endian 2-byte address. Every bit-pattern is some kind of address.
    pub fn parse(data: [u8; 2]) -> Self {
        let val = u16::from_be_bytes(data);
        if val == 0 {
            Self::Unassigned
        } else if UnicastAddress::is_unicast_address(&data) {
            Self::Unicast(UnicastAddress(val))
        } else if GroupAddress::is_group_address(&data) {
            Self::Group(GroupAddress::from_bits(val))
        } else {
            Self::Virtual(VirtualAddress(val))
        }
    }

    /// Classify an address carried little-endian in a message's parameters.
    pub fn parse_le(data: [u8; 2]) -> Self {
        Self::parse([data[1], data[0]])
    }

    pub fn is_unicast(&self) -> bool {
        matches!(self, Self::Unicast(_))
    }
}

impl From<Address> for u16 {
    fn from(addr: Address) -> Self {
        u16::from_be_bytes(addr.as_bytes())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnicastAddress(u16);

impl UnicastAddress {
    pub fn new(addr: u16) -> Result<Self, InvalidAddress> {
        if addr != 0 && Self::is_unicast_address(&addr.to_be_bytes()) {
            Ok(Self(addr))
        } else {
            Err(InvalidAddress)
        }
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_unicast_address(data: &[u8; 2]) -> bool {
        data[0] & 0b10000000 == 0
    }

    pub fn parse(data: [u8; 2]) -> Result<Self, InvalidAddress> {
        Self::new(u16::from_be_bytes(data))
    }
}

impl core::fmt::LowerHex for UnicastAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UnicastAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u16:04x}", self.0);
    }
}

impl From<UnicastAddress> for u16 {
    fn from(addr: UnicastAddress) -> Self {
        addr.0
    }
}

impl TryFrom<u16> for UnicastAddress {
    type Error = InvalidAddress;

    fn try_from(addr: u16) -> Result<Self, Self::Error> {
        Self::new(addr)
    }
}

impl From<UnicastAddress> for Address {
    fn from(addr: UnicastAddress) -> Self {
        Self::Unicast(addr)
    }
}

/// A virtual address, the 16-bit hash of one or more label UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualAddress(u16);

impl VirtualAddress {
    pub fn new(addr: u16) -> Result<Self, InvalidAddress> {
        if Self::is_virtual_address(&addr.to_be_bytes()) {
            Ok(Self(addr))
        } else {
            Err(InvalidAddress)
        }
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn is_virtual_address(data: &[u8; 2]) -> bool {
        data[0] & 0b11000000 == 0b10000000
    }
}

impl From<VirtualAddress> for Address {
    fn from(addr: VirtualAddress) -> Self {
        Self::Virtual(addr)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupAddress {
    RFU(u16),
    Normal(u16),
    AllProxies,
    AllFriends,
    AllRelays,
    AllNodes,
}

impl GroupAddress {
    pub fn as_bytes(&self) -> [u8; 2] {
        match self {
            GroupAddress::RFU(addr) | GroupAddress::Normal(addr) => addr.to_be_bytes(),
            GroupAddress::AllProxies => [0xFF, 0xFC],
            GroupAddress::AllFriends => [0xFF, 0xFD],
            GroupAddress::AllRelays => [0xFF, 0xFE],
            GroupAddress::AllNodes => [0xFF, 0xFF],
        }
    }

    pub fn is_group_address(data: &[u8; 2]) -> bool {
        data[0] & 0b11000000 == 0b11000000
    }

    pub fn parse(data: [u8; 2]) -> Result<Self, InvalidAddress> {
        if Self::is_group_address(&data) {
            Ok(Self::from_bits(u16::from_be_bytes(data)))
        } else {
            Err(InvalidAddress)
        }
    }

    // caller has checked the group bit-pattern
    fn from_bits(addr: u16) -> Self {
        match addr {
            0xFFFC => Self::AllProxies,
            0xFFFD => Self::AllFriends,
            0xFFFE => Self::AllRelays,
            0xFFFF => Self::AllNodes,
            0xFF00..=0xFFFB => Self::RFU(addr),
            _ => Self::Normal(addr),
        }
    }
}

impl From<GroupAddress> for Address {
    fn from(addr: GroupAddress) -> Self {
        Self::Group(addr)
    }
}
