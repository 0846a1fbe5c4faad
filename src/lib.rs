/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of websafe64.
 *
 * websafe64 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * websafe64 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with websafe64. If not, see <https://www.gnu.org/licenses/>.
 */

//! Base64 with a web-safe alphabet.
//!
//! The standard base64 characters `+`, `/` and `=` all need escaping in URLs.
//! This crate replaces them with `-`, `_` and `.`, so encoded data can be put
//! in URLs, file names and HTTP headers as-is. Apart from the alphabet, the
//! format is ordinary padded base64: every 3 input bytes become 4 characters,
//! and a final partial group is filled out with one or two `.` characters.
//!
//! ```
//! let encoded = websafe64::encode_to_string(b"\xfb\xff");
//! assert_eq!(encoded, "-_8.");
//! assert_eq!(websafe64::decode_to_vec(&encoded).unwrap(), b"\xfb\xff");
//! ```
//!
//! Callers that manage their own memory can size buffers with
//! [`encoded_capacity`] and [`decoded_capacity`] and use
//! [`encode_to_slice`] and [`decode_to_slice`], which never allocate.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod decode;
pub mod encode;
mod iter;
mod sextet;
mod table;

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt::{self, Display, Formatter};

/// The 64 data symbols, indexed by 6-bit value.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// The padding symbol.
pub const PAD: u8 = b'.';

const BYTES_PER_GROUP: usize = 3;
const CHARS_PER_GROUP: usize = 4;

/// Returned when a destination slice can't hold the output.
///
/// Nothing is written to the destination when this error is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferTooSmall {
    /// The number of bytes the output needs.
    pub needed: usize,
    /// The length of the destination that was provided.
    pub actual: usize,
}

impl Display for BufferTooSmall {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "destination too small: need {} bytes, got {}",
            self.needed, self.actual,
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for BufferTooSmall {}

pub use decode::decode_bytes;
pub use decode::decode_chars;
pub use decode::decode_str;
pub use decode::decode_to_slice;
#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;
pub use decode::decoded_capacity;
pub use decode::{DecodeError, DecodeResult, DecodeSliceError};

pub use encode::encode_to_bytes;
pub use encode::encode_to_chars;
pub use encode::encode_to_slice;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;
pub use encode::{encoded_capacity, encoded_len};
