//! AutoCAD Color Index values carried on group code 62

use std::fmt;

/// An ACI color number as stored on code `62`.
///
/// `256` means BYLAYER and `0` means BYBLOCK; a negative value is a color
/// whose layer is turned off. True colors travel separately on code `420`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(i16);

impl Color {
    pub const BY_BLOCK: Color = Color(0);
    pub const BY_LAYER: Color = Color(256);

    pub const RED: Color = Color(1);
    pub const YELLOW: Color = Color(2);
    pub const GREEN: Color = Color(3);
    pub const CYAN: Color = Color(4);
    pub const BLUE: Color = Color(5);
    pub const MAGENTA: Color = Color(6);
    pub const WHITE: Color = Color(7);

    /// Wrap a raw index. Out-of-range numbers are kept as they are.
    pub const fn from_index(index: i16) -> Self {
        Color(index)
    }

    /// The raw value written on code `62`.
    pub const fn index(&self) -> i16 {
        self.0
    }

    pub const fn is_by_layer(&self) -> bool {
        self.0 == 256
    }

    pub const fn is_by_block(&self) -> bool {
        self.0 == 0
    }

    /// A negative index marks the owning layer as off.
    pub const fn is_off(&self) -> bool {
        self.0 < 0
    }

    /// The same color with the "off" sign applied.
    pub const fn turned_off(&self) -> Color {
        if self.0 > 0 {
            Color(-self.0)
        } else {
            *self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BY_LAYER
    }
}

impl From<i16> for Color {
    fn from(index: i16) -> Self {
        Color(index)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            256 => write!(f, "BYLAYER"),
            0 => write!(f, "BYBLOCK"),
            n if n < 0 => write!(f, "{} (off)", -n),
            n => write!(f, "{}", n),
        }
    }
}
