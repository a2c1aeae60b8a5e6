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

//! BSD `vis`/`unvis` encoding in the octal style.
//!
//! Bytes that are not printable ASCII, along with the members of a
//! configurable [`CharSet`], are written as a backslash followed by three
//! octal digits (`\ddd`). Everything else is copied as-is. Decoding reverses
//! this exactly:
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! let encoded = bsdvis::encode_to_vec(b"a b\xff", None).unwrap();
//! assert_eq!(encoded, b"a\\040b\\377");
//! assert_eq!(bsdvis::decode_to_vec(&encoded).unwrap(), b"a b\xff");
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod buffer;
pub mod charset;
pub mod decode;
mod digit;
pub mod encode;
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub mod host;

#[cfg(feature = "alloc")]
extern crate alloc;

const ESCAPE: u8 = b'\\';
const DIGITS_PER_ESCAPE: usize = 3;
const ESCAPE_LEN: usize = 1 + DIGITS_PER_ESCAPE;

use digit::Digit;

pub use buffer::OutOfMemory;
pub use charset::{needs_escaping, CharSet, CharSetError};

pub use decode::decode_bytes;
pub use decode::decode_str;
#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;

pub use encode::encode_bytes;
pub use encode::encode_bytes_with;
pub use encode::encoded_len;
#[cfg(feature = "alloc")]
pub use encode::{encode_to_string, encode_to_vec, encode_with_chars};
