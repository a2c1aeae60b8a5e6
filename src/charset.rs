/*
 * Copyright (C) 2021 taylor.fish <contact@taylor.fish>
 *
 * This file is part of bsdvis.
 *
 * bsdvis is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * bsdvis is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with bsdvis. If not, see <https://www.gnu.org/licenses/>.
 */

//! Sets of additional characters to escape, and the escaping predicate.

use core::fmt::{self, Debug, Formatter};

/// Also encode double quote.
pub const VIS_DQ: CharSet = CharSet::lit(b"\"");
/// Also encode globbing characters.
pub const VIS_GLOB: CharSet = CharSet::lit(b"*?[#");
/// Also encode shell special characters.
pub const VIS_SHELL: CharSet = CharSet::lit(b"';\"&<>()|]\\$!^~`");
/// Also encode space.
pub const VIS_SP: CharSet = CharSet::lit(b" ");
/// Also encode tab.
pub const VIS_TAB: CharSet = CharSet::lit(b"\t");
/// Also encode newline.
pub const VIS_NL: CharSet = CharSet::lit(b"\n");

/// An error encountered while building a [`CharSet`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharSetError {
    /// The character list contained a byte outside the ASCII range, such as
    /// part of a multibyte UTF-8 sequence.
    HighBit(u8),
}

impl fmt::Display for CharSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighBit(b) => write!(
                f,
                "character list contains multibyte characters (byte {:#04x})",
                b,
            ),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for CharSetError {}

/// Returns whether `b` is printable in the C locale (`' '..='~'`).
pub fn is_printable(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}

/// A set of ASCII bytes to escape in addition to the bytes that are always
/// escaped (non-printable and high-bit bytes).
///
/// The default set is [`CharSet::DEFAULT`]. Members that are not printable
/// are accepted but have no effect, since those bytes are escaped anyway;
/// [`CharSet::has_unprintable`] reports whether any were given.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharSet {
    mask: u128,
}

// Control characters and DEL.
const UNPRINTABLE_MASK: u128 = (1 << 0x20) - 1 | 1 << 0x7f;

impl CharSet {
    /// The empty set. Only non-printable and high-bit bytes are escaped.
    pub const EMPTY: Self = Self { mask: 0 };

    /// Globbing and shell special characters, space, tab, and newline.
    ///
    /// [`VIS_DQ`] is not part of this union on its own account; double
    /// quote is still present because [`VIS_SHELL`] includes it.
    pub const DEFAULT: Self = VIS_GLOB
        .union(VIS_SHELL)
        .union(VIS_SP)
        .union(VIS_TAB)
        .union(VIS_NL);

    // Only used for the constants above: a byte >= 128 overflows the shift
    // and fails const evaluation.
    const fn lit(bytes: &[u8]) -> Self {
        let mut mask = 0_u128;
        let mut i = 0;
        while i < bytes.len() {
            mask |= 1 << bytes[i];
            i += 1;
        }
        Self { mask }
    }

    /// Builds a set from a list of characters. Order and duplicates don't
    /// matter.
    ///
    /// Fails if any byte is 0x80 or above.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CharSetError> {
        bytes.iter().try_fold(Self::EMPTY, |set, &b| set.with(b))
    }

    /// Returns this set with `b` added.
    pub fn with(self, b: u8) -> Result<Self, CharSetError> {
        if b >= 0x80 {
            return Err(CharSetError::HighBit(b));
        }
        Ok(Self { mask: self.mask | 1 << b })
    }

    pub const fn union(self, other: Self) -> Self {
        Self { mask: self.mask | other.mask }
    }

    pub const fn contains(&self, b: u8) -> bool {
        b < 0x80 && self.mask & 1 << b != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Whether any member is a non-printable byte. Such members are
    /// redundant: those bytes are always escaped.
    ///
    /// [`CharSet::DEFAULT`] has some (tab and newline).
    pub const fn has_unprintable(&self) -> bool {
        self.mask & UNPRINTABLE_MASK != 0
    }

    /// Returns whether `b` must be escaped under this set.
    pub fn needs_escaping(&self, b: u8) -> bool {
        !is_printable(b) || self.contains(b)
    }

    /// Iterates over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..0x80).filter(move |&b| self.contains(b))
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Debug for CharSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|b| b as char))
            .finish()
    }
}

/// Returns whether `b` must be escaped. `None` selects
/// [`CharSet::DEFAULT`].
pub fn needs_escaping(b: u8, set: Option<&CharSet>) -> bool {
    set.unwrap_or(&CharSet::DEFAULT).needs_escaping(b)
}
