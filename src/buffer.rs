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

use core::fmt::{self, Formatter};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The output buffer could not be allocated.
///
/// `requested` is `None` when the size itself overflowed `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfMemory {
    requested: Option<usize>,
}

impl OutOfMemory {
    #[cfg(feature = "alloc")]
    pub(crate) fn overflow() -> Self {
        Self {
            requested: None,
        }
    }

    /// The number of bytes that was requested, if representable.
    pub fn requested(&self) -> Option<usize> {
        self.requested
    }
}

impl fmt::Display for OutOfMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.requested {
            Some(n) => write!(f, "memory allocation of {} bytes failed", n),
            None => write!(f, "memory allocation failed: size overflow"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for OutOfMemory {}

/// Allocates an empty buffer able to hold exactly `len` bytes without
/// reallocating.
#[cfg(feature = "alloc")]
pub(crate) fn with_capacity(len: usize) -> Result<Vec<u8>, OutOfMemory> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| OutOfMemory {
        requested: Some(len),
    })?;
    Ok(buf)
}
