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

//! The `enc` and `dec` entry points for embedding environments.
//!
//! These never fail. Problems are reported to a [`Host`] and the call
//! returns either the input unaltered (for a rejected character list) or an
//! empty buffer.

use super::buffer::OutOfMemory;
use super::charset::{CharSet, CharSetError};
use super::decode::decode_to_vec;
use super::encode::encode_to_vec;

use alloc::{boxed::Box, vec::Vec};
use core::fmt::Arguments;

/// The `log` target used by [`LogHost`].
pub const LOG_TARGET: &str = "bsdvis";

/// Receives diagnostics from [`enc`] and [`dec`].
pub trait Host {
    /// A problem that doesn't stop the call.
    fn warning(&self, msg: Arguments<'_>);

    /// A problem that aborts the call but not the process.
    fn nonfatal(&self, msg: Arguments<'_>);
}

impl<H: Host + ?Sized> Host for &H {
    fn warning(&self, msg: Arguments<'_>) {
        (**self).warning(msg);
    }

    fn nonfatal(&self, msg: Arguments<'_>) {
        (**self).nonfatal(msg);
    }
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn warning(&self, msg: Arguments<'_>) {
        (**self).warning(msg);
    }

    fn nonfatal(&self, msg: Arguments<'_>) {
        (**self).nonfatal(msg);
    }
}

/// A [`Host`] that forwards warnings to [`log::warn!`] and non-fatal errors
/// to [`log::error!`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogHost;

impl Host for LogHost {
    fn warning(&self, msg: Arguments<'_>) {
        log::warn!(target: LOG_TARGET, "{}", msg);
    }

    fn nonfatal(&self, msg: Arguments<'_>) {
        log::error!(target: LOG_TARGET, "{}", msg);
    }
}

/// Builds the set for a caller-supplied character list, reporting problems
/// to `host` the way [`enc`] does. `None` selects [`CharSet::DEFAULT`]
/// without any checks.
///
/// Returns `Err` if the list has a byte at or above 0x80; the caller should
/// then pass its input through unaltered. Non-printable members cause one
/// warning and are otherwise ignored.
pub fn resolve_charset<H: Host>(
    host: &H,
    chars: Option<&[u8]>,
) -> Result<CharSet, CharSetError> {
    let set = match chars {
        Some(chars) => CharSet::from_bytes(chars).map_err(|e| {
            host.warning(format_args!(
                "vis:enc: {}, returning input unaltered",
                e,
            ));
            e
        })?,
        None => return Ok(CharSet::DEFAULT),
    };
    if set.has_unprintable() {
        host.warning(format_args!(
            "vis:enc: character list contains non-printable characters \
             that will be ignored",
        ));
    }
    Ok(set)
}

/// Unwraps an output buffer, or reports the failure to `host` as a
/// non-fatal error and returns an empty buffer.
fn or_nonfatal<H: Host>(
    host: &H,
    name: &str,
    result: Result<Vec<u8>, OutOfMemory>,
) -> Vec<u8> {
    result.unwrap_or_else(|e| {
        host.nonfatal(format_args!("vis:{}: {}", name, e));
        Vec::new()
    })
}

/// Encodes `text`, escaping the bytes of `charset` instead of
/// [`CharSet::DEFAULT`] if given.
///
/// * `text` absent: returns an empty buffer.
/// * `charset` has a byte at or above 0x80: warns and returns `text`
///   unaltered. This is the only warning for such a list, even if it also
///   has non-printable bytes before the offending one; the gawk extension
///   this mirrors warns about those first.
/// * `charset` has non-printable bytes: warns once and encodes anyway;
///   those bytes are escaped regardless.
/// * allocation fails: reports a non-fatal error and returns an empty
///   buffer.
///
/// See [`resolve_charset`].
pub fn enc<H: Host>(
    host: H,
    text: Option<&[u8]>,
    charset: Option<&[u8]>,
) -> Vec<u8> {
    let text = match text {
        Some(text) => text,
        None => return Vec::new(),
    };
    match resolve_charset(&host, charset) {
        Ok(set) => or_nonfatal(&host, "enc", encode_to_vec(text, Some(&set))),
        Err(_) => text.to_vec(),
    }
}

/// Decodes `text`.
///
/// * `text` absent: returns an empty buffer.
/// * allocation fails: reports a non-fatal error and returns an empty
///   buffer.
///
/// Malformed escapes are not reported; see [`crate::decode`].
pub fn dec<H: Host>(host: H, text: Option<&[u8]>) -> Vec<u8> {
    let text = match text {
        Some(text) => text,
        None => return Vec::new(),
    };
    or_nonfatal(&host, "dec", decode_to_vec(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use core::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        warnings: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Host for Recorder {
        fn warning(&self, msg: Arguments<'_>) {
            self.warnings.borrow_mut().push(msg.to_string());
        }

        fn nonfatal(&self, msg: Arguments<'_>) {
            self.errors.borrow_mut().push(msg.to_string());
        }
    }

    #[test]
    fn absent_text() {
        let host = Recorder::default();
        assert!(enc(&host, None, None).is_empty());
        assert!(enc(&host, None, Some(b"\x80")).is_empty());
        assert!(dec(&host, None).is_empty());
        assert!(host.warnings.borrow().is_empty());
    }

    #[test]
    fn empty_text() {
        let host = Recorder::default();
        assert!(enc(&host, Some(b""), None).is_empty());
        assert!(dec(&host, Some(b"")).is_empty());
        assert!(host.warnings.borrow().is_empty());
        assert!(host.errors.borrow().is_empty());
    }

    #[test]
    fn rejected_charset_passes_through() {
        let host = Recorder::default();
        let out = enc(&host, Some(b"a b\n"), Some(b"x\x80"));
        assert_eq!(out, b"a b\n");
        let warnings = host.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("returning input unaltered"));
    }

    #[test]
    fn unprintable_charset_warns_once() {
        let host = Recorder::default();
        let out = enc(&host, Some(b"a\x01b\x02 "), Some(b"\x01\x02b"));
        assert_eq!(out, b"a\\001\\142\\002 ");
        let warnings = host.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("non-printable"));
    }

    #[test]
    fn default_round_trip() {
        let host = Recorder::default();
        let encoded = enc(&host, Some(b"it's a\ttest\n"), None);
        assert_eq!(encoded, b"it\\047s\\040a\\011test\\012");
        assert_eq!(dec(&host, Some(&encoded)), b"it's a\ttest\n");
    }

    #[test]
    fn out_of_memory_is_nonfatal() {
        let host = Recorder::default();
        let out = or_nonfatal(&host, "enc", Err(OutOfMemory::overflow()));
        assert!(out.is_empty());
        assert!(host.warnings.borrow().is_empty());
        let errors = host.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("vis:enc: memory allocation failed"));

        let out = or_nonfatal(&host, "dec", Ok(b"ok".to_vec()));
        assert_eq!(out, b"ok");
        assert_eq!(host.errors.borrow().len(), 1);
    }

    #[test]
    fn resolve_charset_reports() {
        let host = Recorder::default();
        assert_eq!(resolve_charset(&host, None), Ok(CharSet::DEFAULT));
        assert_eq!(
            resolve_charset(&host, Some(b"\x01\x80")),
            Err(CharSetError::HighBit(0x80)),
        );
        assert_eq!(host.warnings.borrow().len(), 1);
        let set = resolve_charset(&host, Some(b"\t*")).unwrap();
        assert!(set.contains(b'*'));
        assert_eq!(host.warnings.borrow().len(), 2);
        assert!(host.warnings.borrow()[1].contains("non-printable"));
    }

    #[test]
    fn boxed_host() {
        let host: Box<dyn Host> = Box::new(LogHost);
        assert_eq!(enc(host, Some(b"A"), Some(b"")), b"A");
    }
}
