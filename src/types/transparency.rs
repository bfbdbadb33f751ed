//! Transparency values carried on group code 440

use std::fmt;

/// Raw 32-bit transparency word.
///
/// The high byte selects the kind: `0` BYLAYER, `1` BYBLOCK, `2` an explicit
/// alpha in the low byte (0 = fully transparent, 255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transparency(i32);

impl Transparency {
    pub const BY_LAYER: Transparency = Transparency(0);
    pub const BY_BLOCK: Transparency = Transparency(0x0100_0000);

    /// Keep a raw `440` value as read.
    pub const fn from_raw(raw: i32) -> Self {
        Transparency(raw)
    }

    /// Explicit alpha, 0 transparent to 255 opaque.
    pub const fn from_alpha(alpha: u8) -> Self {
        Transparency(0x0200_0000 | alpha as i32)
    }

    pub const fn raw(&self) -> i32 {
        self.0
    }

    /// The explicit alpha byte, if this word carries one.
    pub const fn alpha(&self) -> Option<u8> {
        if (self.0 >> 24) & 0xFF == 2 {
            Some((self.0 & 0xFF) as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0 >> 24) & 0xFF {
            0 => write!(f, "ByLayer"),
            1 => write!(f, "ByBlock"),
            _ => match self.alpha() {
                Some(a) => write!(f, "alpha {}", a),
                None => write!(f, "raw {:#x}", self.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_word() {
        let t = Transparency::from_alpha(127);
        assert_eq!(t.raw(), 0x0200_007F);
        assert_eq!(t.alpha(), Some(127));
        assert_eq!(Transparency::from_raw(t.raw()), t);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(Transparency::BY_LAYER.alpha(), None);
        assert_eq!(Transparency::BY_BLOCK.to_string(), "ByBlock");
        assert_eq!(Transparency::BY_LAYER.to_string(), "ByLayer");
    }
}
