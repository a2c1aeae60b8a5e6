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

//! Functions and types for vis-encoding data.

use super::buffer::OutOfMemory;
use super::charset::{CharSet, CharSetError};
use super::Digit;
use super::{DIGITS_PER_ESCAPE, ESCAPE, ESCAPE_LEN};

use core::array;
use core::fmt::{self, Formatter};
use core::iter::{Fuse, FusedIterator};

#[cfg(feature = "alloc")]
use super::buffer;
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Returns the escape sequence for `b`.
pub fn escape(b: u8) -> [u8; ESCAPE_LEN] {
    let [d1, d2, d3] = Digit::split(b).map(Digit::to_ascii);
    [ESCAPE, d1, d2, d3]
}

/// Iterator returned by [`encode_bytes`] and [`encode_bytes_with`].
pub struct Encoder<I> {
    iter: Fuse<I>,
    set: CharSet,
    digits: Option<array::IntoIter<u8, DIGITS_PER_ESCAPE>>,
}

impl<I: Iterator> Encoder<I> {
    pub(crate) fn new(iter: I, set: CharSet) -> Self {
        Self {
            iter: iter.fuse(),
            set,
            digits: None,
        }
    }
}

impl<I> Encoder<I> {
    fn pending(&self) -> usize {
        self.digits.as_ref().map_or(0, |d| d.len())
    }
}

impl<I> Iterator for Encoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(d) = self.digits.as_mut().and_then(Iterator::next) {
            return Some(d);
        }
        self.digits = None;
        let b = self.iter.next()?;
        if !self.set.needs_escaping(b) {
            return Some(b);
        }
        let [_, d1, d2, d3] = escape(b);
        self.digits = Some(IntoIterator::into_iter([d1, d2, d3]));
        Some(ESCAPE)
    }

    fn fold<B, F>(self, mut init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        if let Some(digits) = self.digits {
            init = digits.fold(init, &mut f);
        }
        let set = self.set;
        self.iter.fold(init, |b, item| {
            if set.needs_escaping(item) {
                IntoIterator::into_iter(escape(item)).fold(b, &mut f)
            } else {
                f(b, item)
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        let pending = self.pending();
        (
            lower.saturating_add(pending),
            upper
                .and_then(|n| n.checked_mul(ESCAPE_LEN))
                .and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for Encoder<I> {}

/// Iterator returned by [`encode_to_chars`] and [`encode_to_chars_with`].
pub struct CharEncoder<I>(Encoder<I>);

impl<I> Iterator for CharEncoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(char::from)
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, |b, item| f(b, char::from(item)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for CharEncoder<I> {}

/// Encodes a sequence of bytes with [`CharSet::DEFAULT`].
pub fn encode_bytes<I>(bytes: I) -> Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    encode_bytes_with(bytes, &CharSet::DEFAULT)
}

/// Encodes a sequence of bytes, escaping the members of `set` in addition to
/// non-printable and high-bit bytes.
pub fn encode_bytes_with<I>(bytes: I, set: &CharSet) -> Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Encoder::new(bytes.into_iter(), *set)
}

/// Encodes a sequence of bytes to ASCII chars with [`CharSet::DEFAULT`].
pub fn encode_to_chars<I>(bytes: I) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    encode_to_chars_with(bytes, &CharSet::DEFAULT)
}

/// Like [`encode_to_chars`], but with a custom set.
pub fn encode_to_chars_with<I>(
    bytes: I,
    set: &CharSet,
) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CharEncoder(encode_bytes_with(bytes, set))
}

/// Returns the exact length of the encoding of `input`, or `None` if it
/// doesn't fit in a `usize`. `None` for `set` selects [`CharSet::DEFAULT`].
pub fn encoded_len(input: &[u8], set: Option<&CharSet>) -> Option<usize> {
    let set = set.unwrap_or(&CharSet::DEFAULT);
    input.iter().try_fold(0_usize, |len, &b| {
        len.checked_add(if set.needs_escaping(b) { ESCAPE_LEN } else { 1 })
    })
}

/// Encodes `input` into a newly allocated buffer of exactly
/// [`encoded_len`] bytes.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_vec(
    input: &[u8],
    set: Option<&CharSet>,
) -> Result<Vec<u8>, OutOfMemory> {
    let set = set.unwrap_or(&CharSet::DEFAULT);
    let len =
        encoded_len(input, Some(set)).ok_or_else(OutOfMemory::overflow)?;
    let mut buf = buffer::with_capacity(len)?;
    for &b in input {
        if set.needs_escaping(b) {
            buf.extend_from_slice(&escape(b));
        } else {
            buf.push(b);
        }
    }
    debug_assert_eq!(buf.len(), len);
    Ok(buf)
}

/// Like [`encode_to_vec`], but returns a [`String`]. Encoded data is always
/// ASCII.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(
    input: &[u8],
    set: Option<&CharSet>,
) -> Result<String, OutOfMemory> {
    let ascii = encode_to_vec(input, set)?;
    debug_assert!(ascii.is_ascii(), "[debug] encoded data is not ASCII");

    // SAFETY: Every byte written by `encode_to_vec` is printable ASCII or
    // part of an escape sequence, which is also ASCII.
    Ok(unsafe { String::from_utf8_unchecked(ascii) })
}

/// An error encountered by [`encode_with_chars`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The character list was refused; nothing was encoded.
    Rejected(CharSetError),
    /// The output buffer could not be allocated.
    OutOfMemory(OutOfMemory),
}

/// Alias of <code>[Result]\<T, [EncodeError]></code>.
pub type EncodeResult<T> = Result<T, EncodeError>;

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(e) => write!(f, "{}", e),
            Self::OutOfMemory(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for EncodeError {}

impl From<CharSetError> for EncodeError {
    fn from(e: CharSetError) -> Self {
        Self::Rejected(e)
    }
}

impl From<OutOfMemory> for EncodeError {
    fn from(e: OutOfMemory) -> Self {
        Self::OutOfMemory(e)
    }
}

/// Encodes `input`, escaping the characters in `chars` in addition to
/// non-printable and high-bit bytes.
///
/// `chars` must not contain bytes at or above 0x80. Non-printable bytes in
/// `chars` are allowed but redundant.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_with_chars(input: &[u8], chars: &[u8]) -> EncodeResult<Vec<u8>> {
    let set = CharSet::from_bytes(chars)?;
    Ok(encode_to_vec(input, Some(&set))?)
}
