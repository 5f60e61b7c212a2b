//! Mouth shapes produced by phoneme analysis.
//!
//! Labels follow the Rhubarb convention: `A`..`H` for the basic and
//! extended shapes and `X` for the idle/rest mouth. Each shape owns one
//! slot in a nine-image mouth model.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouthShape {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    X,
}

impl MouthShape {
    /// All shapes in image-slot order.
    pub const ALL: [MouthShape; 9] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::X,
    ];

    /// Shape for a cue label. Unknown labels map to the rest shape.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "D" => Self::D,
            "E" => Self::E,
            "F" => Self::F,
            "G" => Self::G,
            "H" => Self::H,
            _ => Self::X,
        }
    }

    /// Slot of this shape in the mouth model (0..=8).
    pub fn image_index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(8)
    }

    /// Shape for an image slot; out of range maps to the rest shape.
    pub fn from_image_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::X)
    }

    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::X => 'X',
        }
    }
}

impl fmt::Display for MouthShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
