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

//! Functions and types for encoding data.

use super::iter::{BaseIterator, Flatten, InspectBaseIterator};
use super::sextet::Sextet;
use super::BufferTooSmall;
use super::{BYTES_PER_GROUP, CHARS_PER_GROUP, PAD};

use core::array;
use core::iter::{Fuse, FusedIterator};

#[cfg(feature = "alloc")]
use alloc::string::String;

/// The exact length of the text produced by encoding `n` bytes.
///
/// This is `ceil(n / 3) * 4`. It can be compared against the length of
/// received text to check that it encodes a payload of an expected size
/// before decoding it.
pub const fn encoded_len(n: usize) -> usize {
    let groups = n / BYTES_PER_GROUP + (n % BYTES_PER_GROUP != 0) as usize;
    groups * CHARS_PER_GROUP
}

/// A buffer size that is always large enough to encode `n` bytes.
///
/// This is [`encoded_len(n)`](encoded_len) plus one spare byte, for callers
/// that want room for a terminator after the text.
pub const fn encoded_capacity(n: usize) -> usize {
    encoded_len(n) + 1
}

/// Packs `len` (1 to 3) bytes into four symbols, most significant bits first.
/// Unused positions are filled with [`PAD`].
fn encode_group(bytes: [u8; BYTES_PER_GROUP], len: usize) -> [u8; 4] {
    debug_assert!((1..=BYTES_PER_GROUP).contains(&len));
    let n = u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]);
    let mut out =
        [18, 12, 6, 0].map(|shift| Sextet::from_low_bits(n >> shift).symbol());
    out[len + 1..].iter_mut().for_each(|c| *c = PAD);
    out
}

/// Encodes `src` into the start of `dest` and returns the number of bytes
/// written, which is always [`encoded_len(src.len())`](encoded_len).
///
/// `dest` must be at least that long; a buffer of
/// [`encoded_capacity(src.len())`](encoded_capacity) bytes always is. If it
/// is too short, nothing is written and [`BufferTooSmall`] is returned.
///
/// ```
/// let mut buf = [0; websafe64::encoded_capacity(2)];
/// let len = websafe64::encode_to_slice(b"fo", &mut buf).unwrap();
/// assert_eq!(&buf[..len], b"Zm8.");
/// ```
pub fn encode_to_slice(
    src: &[u8],
    dest: &mut [u8],
) -> Result<usize, BufferTooSmall> {
    let needed = encoded_len(src.len());
    if dest.len() < needed {
        return Err(BufferTooSmall {
            needed,
            actual: dest.len(),
        });
    }
    src.chunks(BYTES_PER_GROUP)
        .zip(dest.chunks_exact_mut(CHARS_PER_GROUP))
        .for_each(|(chunk, out)| {
            let mut group = [0; BYTES_PER_GROUP];
            group[..chunk.len()].copy_from_slice(chunk);
            out.copy_from_slice(&encode_group(group, chunk.len()));
        });
    Ok(needed)
}

struct BytesToGroups<I>(I);

impl<I> BytesToGroups<I> {
    pub fn new(iter: I) -> Self {
        Self(iter)
    }
}

impl<I: InspectBaseIterator> InspectBaseIterator for BytesToGroups<I> {
    type Iter = I::Iter;

    fn base_iterator(&self) -> &Self::Iter {
        self.0.base_iterator()
    }
}

type BytesToGroupsItem = array::IntoIter<u8, CHARS_PER_GROUP>;

impl<I> Iterator for BytesToGroups<I>
where
    I: FusedIterator<Item = u8>,
{
    type Item = BytesToGroupsItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mut group = [0; BYTES_PER_GROUP];
        let len = self
            .0
            .by_ref()
            .take(BYTES_PER_GROUP)
            .zip(group.iter_mut())
            .map(|(b, slot)| *slot = b)
            .count();
        (len > 0).then(|| IntoIterator::into_iter(encode_group(group, len)))
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for BytesToGroups<I> {}

/// Iterator returned by [`encode_to_bytes`].
pub struct Encoder<I>(
    Flatten<BytesToGroups<BaseIterator<Fuse<I>>>, BytesToGroupsItem>,
);

impl<I: Iterator> Encoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self(Flatten::new(BytesToGroups::new(BaseIterator(iter.fuse()))))
    }
}

impl<I> Iterator for Encoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.0.pending();
        let (lower, upper) = self.0.base_iterator().size_hint();
        // `encoded_len` only overflows for inputs longer than any slice can
        // be, so saturate rather than give up on the hint.
        let len = |n: usize| {
            (n / BYTES_PER_GROUP)
                .checked_add((n % BYTES_PER_GROUP != 0) as usize)
                .and_then(|g| g.checked_mul(CHARS_PER_GROUP))
                .and_then(|g| g.checked_add(pending))
        };
        (
            len(lower).unwrap_or(usize::MAX),
            upper.and_then(len),
        )
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for Encoder<I> {}

/// Iterator returned by [`encode_to_chars`].
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
        self.0.fold(init, |b, c| f(b, char::from(c)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<I: Iterator<Item = u8>> FusedIterator for CharEncoder<I> {}

/// Encodes a sequence of bytes, yielding the encoded text as ASCII bytes.
///
/// The input is consumed lazily, three bytes per four output bytes.
///
/// ```
/// let text: Vec<u8> = websafe64::encode_to_bytes(*b"foo").collect();
/// assert_eq!(text, b"Zm9v");
/// ```
pub fn encode_to_bytes<I>(bytes: I) -> Encoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Encoder::new(bytes.into_iter())
}

/// Encodes a sequence of bytes, yielding the encoded text as [`char`]s.
pub fn encode_to_chars<I>(bytes: I) -> CharEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CharEncoder(encode_to_bytes(bytes))
}

/// Encodes `bytes` into a new [`String`].
///
/// ```
/// assert_eq!(websafe64::encode_to_string("f"), "Zg..");
/// assert_eq!(websafe64::encode_to_string(""), "");
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string<T>(bytes: T) -> String
where
    T: AsRef<[u8]>,
{
    let bytes = bytes.as_ref();
    let mut s = String::with_capacity(encoded_len(bytes.len()));
    s.extend(encode_to_chars(bytes.iter().copied()));
    s
}
