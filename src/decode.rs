/*
 * Copyright (C) 2021-2022 taylor.fish <contact@taylor.fish>
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

//! Functions and types for decoding vis-encoded data.
//!
//! Decoding never fails: a backslash that doesn't begin a complete `\ddd`
//! escape (three digits in `0`–`7`) is copied through as-is, along with
//! everything after it.

use super::Digit;
use super::{ESCAPE, ESCAPE_LEN};

use core::iter::{Fuse, FusedIterator};
use core::str::Bytes;

#[cfg(feature = "alloc")]
use super::buffer::{self, OutOfMemory};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Decodes the escape sequence at the start of `window`, if there is one.
pub fn unescape(window: &[u8]) -> Option<u8> {
    match window {
        [ESCAPE, d1, d2, d3, ..] => Some(Digit::join([
            Digit::from_ascii(*d1)?,
            Digit::from_ascii(*d2)?,
            Digit::from_ascii(*d3)?,
        ])),
        _ => None,
    }
}

/// Iterator returned by [`decode_bytes`].
pub struct Decoder<I> {
    iter: Fuse<I>,
    window: [u8; ESCAPE_LEN],
    len: usize,
}

impl<I: Iterator> Decoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            window: [0; ESCAPE_LEN],
            len: 0,
        }
    }
}

impl<I> Decoder<I>
where
    I: Iterator<Item = u8>,
{
    fn fill(&mut self) {
        while self.len < ESCAPE_LEN {
            match self.iter.next() {
                Some(b) => {
                    self.window[self.len] = b;
                    self.len += 1;
                }
                None => break,
            }
        }
    }

    fn consume(&mut self, n: usize) {
        self.window.copy_within(n..self.len, 0);
        self.len -= n;
    }
}

impl<I> Iterator for Decoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            let b = self.iter.next()?;
            if b != ESCAPE {
                return Some(b);
            }
            self.window[0] = b;
            self.len = 1;
        }
        if self.window[0] == ESCAPE {
            self.fill();
            if let Some(b) = unescape(&self.window[..self.len]) {
                self.consume(ESCAPE_LEN);
                return Some(b);
            }
        }
        let b = self.window[0];
        self.consume(1);
        Some(b)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        (
            // Every four input bytes produce at least one output byte.
            lower.saturating_add(self.len).saturating_add(ESCAPE_LEN - 1)
                / ESCAPE_LEN,
            upper.and_then(|n| n.checked_add(self.len)),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for Decoder<I> {}

/// Iterator returned by [`decode_str`].
pub struct StrDecoder<'a>(Decoder<Bytes<'a>>);

impl<'a> Iterator for StrDecoder<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> FusedIterator for StrDecoder<'a> {}

/// Decodes a sequence of vis-encoded bytes.
pub fn decode_bytes<I>(bytes: I) -> Decoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Decoder::new(bytes.into_iter())
}

/// Decodes a vis-encoded `str`.
pub fn decode_str(s: &str) -> StrDecoder<'_> {
    StrDecoder(Decoder::new(s.bytes()))
}

/// Decodes `input` into a newly allocated buffer.
///
/// The buffer's capacity is `input.len()`, since decoding never lengthens
/// data; its length is the exact number of decoded bytes.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec(input: &[u8]) -> Result<Vec<u8>, OutOfMemory> {
    let mut buf = buffer::with_capacity(input.len())?;
    let mut rest = input;
    while let Some((&b, tail)) = rest.split_first() {
        if let Some(b) = unescape(rest) {
            buf.push(b);
            rest = &rest[ESCAPE_LEN..];
        } else {
            buf.push(b);
            rest = tail;
        }
    }
    Ok(buf)
}
