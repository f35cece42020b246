use crate::InsufficientBuffer;
use heapless::Vec;

/// Access-layer opcode, 1 to 3 octets long as signalled by its leading bits.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Opcode {
    OneOctet(u8),
    TwoOctet(u8, u8),
    ThreeOctet(u8, u8, u8),
}

impl Opcode {
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Opcode::OneOctet(a) => data.first() == Some(a),
            Opcode::TwoOctet(a, b) => data.len() >= 2 && data[0] == *a && data[1] == *b,
            Opcode::ThreeOctet(a, b, c) => {
                data.len() >= 3 && data[0] == *a && data[1] == *b && data[2] == *c
            }
        }
    }

    pub fn opcode_len(&self) -> usize {
        match self {
            Opcode::OneOctet(_) => 1,
            Opcode::TwoOctet(..) => 2,
            Opcode::ThreeOctet(..) => 3,
        }
    }

    /// Split an access payload into its opcode and the parameters following it.
    pub fn split(data: &[u8]) -> Option<(Opcode, &[u8])> {
        let first = *data.first()?;
        if first & 0b10000000 == 0 {
            if first == 0b01111111 {
                // reserved for future use
                None
            } else {
                Some((Opcode::OneOctet(first), &data[1..]))
            }
        } else if first & 0b11000000 == 0b10000000 {
            if data.len() >= 2 {
                Some((Opcode::TwoOctet(first, data[1]), &data[2..]))
            } else {
                None
            }
        } else if data.len() >= 3 {
            Some((Opcode::ThreeOctet(first, data[1], data[2]), &data[3..]))
        } else {
            None
        }
    }

    pub fn emit<const N: usize>(&self, xmit: &mut Vec<u8, N>) -> Result<(), InsufficientBuffer> {
        match self {
            Opcode::OneOctet(a) => xmit.push(*a)?,
            Opcode::TwoOctet(a, b) => xmit.extend_from_slice(&[*a, *b])?,
            Opcode::ThreeOctet(a, b, c) => xmit.extend_from_slice(&[*a, *b, *c])?,
        }
        Ok(())
    }
}

impl core::fmt::Display for Opcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Opcode::OneOctet(a) => write!(f, "{:02x}", a),
            Opcode::TwoOctet(a, b) => write!(f, "{:02x}{:02x}", a, b),
            Opcode::ThreeOctet(a, b, c) => write!(f, "{:02x}{:02x}{:02x}", a, b, c),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Opcode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Opcode::OneOctet(a) => {
                defmt::write!(fmt, "{:02x}", a)
            }
            Opcode::TwoOctet(a, b) => {
                defmt::write!(fmt, "{:02x}{:02x}", a, b)
            }
            Opcode::ThreeOctet(a, b, c) => {
                defmt::write!(fmt, "{:02x}{:02x}{:02x}", a, b, c)
            }
        }
    }
}

#[macro_export]
macro_rules! opcode {
    ($name:ident $o1:expr) => {
        pub const $name: $crate::opcode::Opcode = $crate::opcode::Opcode::OneOctet($o1);
    };

    ($name:ident $o1:expr, $o2:expr) => {
        pub const $name: $crate::opcode::Opcode = $crate::opcode::Opcode::TwoOctet($o1, $o2);
    };

    ($name:ident $o1:expr, $o2:expr, $o3:expr) => {
        pub const $name: $crate::opcode::Opcode = $crate::opcode::Opcode::ThreeOctet($o1, $o2, $o3);
    };
}
