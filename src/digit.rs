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

use super::DIGITS_PER_ESCAPE;

/// A single octal digit (0 through 7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(x: u8) -> Option<Self> {
        (x < 8).then(|| Self(x))
    }

    /// Parses an ASCII digit in `'0'..='7'`.
    pub fn from_ascii(b: u8) -> Option<Self> {
        Self::new(b.wrapping_sub(b'0'))
    }

    pub fn to_ascii(self) -> u8 {
        b'0' + self.0
    }

    /// Splits a byte into its three octal digits, most significant first.
    pub fn split(byte: u8) -> [Self; DIGITS_PER_ESCAPE] {
        [Self(byte >> 6), Self((byte >> 3) & 7), Self(byte & 7)]
    }

    /// Inverse of [`Self::split`]. Digit triples above 0o377 wrap modulo
    /// 256, as an 8-bit store of `d1*64 + d2*8 + d3` would.
    pub fn join(digits: [Self; DIGITS_PER_ESCAPE]) -> u8 {
        let [d1, d2, d3] = digits.map(u16::from);
        (d1 * 64 + d2 * 8 + d3) as u8
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for u16 {
    fn from(d: Digit) -> u16 {
        d.0.into()
    }
}
