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

//! Functions and types for decoding data.
//!
//! Input is accepted only if it is exactly what the encoder would produce for
//! some byte sequence, apart from the unused low bits of the last data symbol
//! in a padded group, which are ignored. Whitespace, line breaks and the
//! standard base64 characters `+`, `/` and `=` are all errors.

use super::iter::{BaseIterator, Flatten, InspectBaseIterator};
use super::sextet::Sextet;
use super::BufferTooSmall;
use super::{BYTES_PER_GROUP, CHARS_PER_GROUP, PAD};

use core::array;
use core::fmt::{self, Display, Formatter};
use core::iter::{Fuse, FusedIterator, Take};
use core::str::Chars;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding.
///
/// Every variant means the same thing, that the input is not valid web-safe
/// base64; the variant only says which check failed first.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Encountered a character that is neither a data symbol nor padding.
    InvalidChar(char),
    /// A padding character was followed by a data character, or appeared
    /// before the final group, or there were more than two of them.
    InvalidPadding,
    /// The input was not a whole number of four-character groups.
    InvalidLength,
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::InvalidChar(c) => write!(f, "invalid character: {:?}", c),
            Self::InvalidPadding => write!(f, "misplaced padding"),
            Self::InvalidLength => write!(f, "bad input length"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// An error encountered by [`decode_to_slice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeSliceError {
    /// The destination can't hold the decoded data.
    BufferTooSmall(BufferTooSmall),
    /// The input is invalid.
    DecodeError(DecodeError),
}

impl Display for DecodeSliceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::BufferTooSmall(e) => write!(f, "{}", e),
            Self::DecodeError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeSliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BufferTooSmall(e) => Some(e),
            Self::DecodeError(e) => Some(e),
        }
    }
}

impl From<BufferTooSmall> for DecodeSliceError {
    fn from(e: BufferTooSmall) -> Self {
        Self::BufferTooSmall(e)
    }
}

impl From<DecodeError> for DecodeSliceError {
    fn from(e: DecodeError) -> Self {
        Self::DecodeError(e)
    }
}

/// A buffer size that is always large enough to decode `len` characters.
///
/// This is `floor(len / 4) * 3 + 2`. The true maximum is two bytes smaller;
/// treat the result as "at least this many bytes", not as the length of the
/// output.
pub const fn decoded_capacity(len: usize) -> usize {
    len / CHARS_PER_GROUP * BYTES_PER_GROUP + 2
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for char {}
}

/// Types that decoders accept as input characters: [`u8`] and [`char`].
pub trait Symbol: Copy + sealed::Sealed {
    /// The 6-bit value of a data symbol.
    #[doc(hidden)]
    fn value(self) -> Option<u32>;

    #[doc(hidden)]
    fn is_pad(self) -> bool;

    #[doc(hidden)]
    fn to_char(self) -> char;
}

impl Symbol for u8 {
    fn value(self) -> Option<u32> {
        Sextet::from_symbol(self).map(u32::from)
    }

    fn is_pad(self) -> bool {
        self == PAD
    }

    fn to_char(self) -> char {
        char::from(self)
    }
}

impl Symbol for char {
    fn value(self) -> Option<u32> {
        u8::try_from(self).ok().and_then(u8::value)
    }

    fn is_pad(self) -> bool {
        self == char::from(PAD)
    }

    fn to_char(self) -> char {
        self
    }
}

/// Number of padding characters at the end of `group` that count as
/// padding. Any others are misplaced and rejected by [`decode_group`].
fn padding_len<S: Symbol>(group: &[S]) -> usize {
    group.iter().rev().take(2).take_while(|c| c.is_pad()).count()
}

/// Unpacks four symbols into up to three bytes. Returns the bytes and how
/// many of them are real.
fn decode_group<S: Symbol>(
    group: [S; CHARS_PER_GROUP],
) -> DecodeResult<([u8; BYTES_PER_GROUP], usize)> {
    let pads = padding_len(&group);
    let data = CHARS_PER_GROUP - pads;
    let n = group.iter().enumerate().try_fold(0_u32, |n, (i, &c)| {
        let bits = if i >= data {
            0
        } else if c.is_pad() {
            return Err(Error::InvalidPadding);
        } else {
            c.value().ok_or_else(|| Error::InvalidChar(c.to_char()))?
        };
        Ok((n << 6) | bits)
    })?;
    let [_, a, b, c] = n.to_be_bytes();
    Ok(([a, b, c], BYTES_PER_GROUP - pads))
}

/// Decodes `src` into the start of `dest` and returns the number of bytes
/// written.
///
/// A `dest` of [`decoded_capacity(src.len())`](decoded_capacity) bytes is
/// always large enough. A shorter one is accepted as long as it can hold the
/// decoded data; otherwise nothing is written and
/// [`DecodeSliceError::BufferTooSmall`] is returned.
///
/// If the input is invalid, some of `dest` may already have been written
/// when the error is returned.
///
/// ```
/// let mut buf = [0; websafe64::decoded_capacity(4)];
/// let len = websafe64::decode_to_slice(b"Zm8.", &mut buf).unwrap();
/// assert_eq!(&buf[..len], b"fo");
/// ```
pub fn decode_to_slice(
    src: &[u8],
    dest: &mut [u8],
) -> Result<usize, DecodeSliceError> {
    if src.len() % CHARS_PER_GROUP != 0 {
        return Err(Error::InvalidLength.into());
    }
    let groups = src.len() / CHARS_PER_GROUP;
    let pads =
        src.chunks_exact(CHARS_PER_GROUP).last().map_or(0, padding_len);
    let needed = groups * BYTES_PER_GROUP - pads;
    if dest.len() < needed {
        return Err(BufferTooSmall {
            needed,
            actual: dest.len(),
        }
        .into());
    }

    src.chunks_exact(CHARS_PER_GROUP)
        .zip(dest.chunks_mut(BYTES_PER_GROUP))
        .enumerate()
        .try_for_each(|(i, (group, out))| {
            let group = [group[0], group[1], group[2], group[3]];
            let (bytes, len) = decode_group(group)?;
            if len < BYTES_PER_GROUP && i + 1 < groups {
                return Err(Error::InvalidPadding);
            }
            out[..len].copy_from_slice(&bytes[..len]);
            Ok(())
        })?;
    Ok(needed)
}

struct SymbolsToGroups<I> {
    iter: I,
    done: bool,
}

impl<I> SymbolsToGroups<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            done: false,
        }
    }
}

impl<I: InspectBaseIterator> InspectBaseIterator for SymbolsToGroups<I> {
    type Iter = I::Iter;

    fn base_iterator(&self) -> &Self::Iter {
        self.iter.base_iterator()
    }
}

type SymbolsToGroupsItem =
    Take<array::IntoIter<DecodeResult<u8>, BYTES_PER_GROUP>>;

impl<I> Iterator for SymbolsToGroups<I>
where
    I: FusedIterator,
    I::Item: Symbol,
{
    type Item = SymbolsToGroupsItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut group = [None; CHARS_PER_GROUP];
        let count = self
            .iter
            .by_ref()
            .take(CHARS_PER_GROUP)
            .zip(group.iter_mut())
            .map(|(c, slot)| *slot = Some(c))
            .count();

        let result = match group {
            _ if count == 0 => return None,
            [Some(a), Some(b), Some(c), Some(d)] => decode_group([a, b, c, d]),
            _ => Err(Error::InvalidLength),
        }
        .and_then(|(bytes, len)| {
            // A padded group must be the last one.
            if len < BYTES_PER_GROUP && self.iter.next().is_some() {
                Err(Error::InvalidPadding)
            } else {
                Ok((bytes, len))
            }
        });

        Some(match result {
            Ok((bytes, len)) => {
                IntoIterator::into_iter(bytes.map(Ok)).take(len)
            }
            Err(e) => {
                self.done = true;
                IntoIterator::into_iter([Err(e), Ok(0), Ok(0)]).take(1)
            }
        })
    }
}

impl<I> FusedIterator for SymbolsToGroups<I>
where
    I: FusedIterator,
    I::Item: Symbol,
{
}

/// Iterator returned by [`decode_bytes`], [`decode_chars`] and
/// [`decode_str`].
///
/// If the input is invalid, this yields a single `Err` and then ends.
pub struct Decoder<I>(
    Flatten<SymbolsToGroups<BaseIterator<Fuse<I>>>, SymbolsToGroupsItem>,
);

impl<I: Iterator> Decoder<I> {
    pub(crate) fn new(iter: I) -> Self {
        Self(Flatten::new(SymbolsToGroups::new(BaseIterator(iter.fuse()))))
    }
}

impl<I> Iterator for Decoder<I>
where
    I: Iterator,
    I::Item: Symbol,
{
    type Item = DecodeResult<u8>;

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
        let (_, upper) = self.0.base_iterator().size_hint();
        (
            pending,
            upper
                .map(|n| {
                    // A trailing partial group still produces an error.
                    n / CHARS_PER_GROUP * BYTES_PER_GROUP
                        + (n % CHARS_PER_GROUP != 0) as usize
                })
                .and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I> FusedIterator for Decoder<I>
where
    I: Iterator,
    I::Item: Symbol,
{
}

/// Decodes a sequence of ASCII bytes.
///
/// ```
/// let bytes: Result<Vec<u8>, _> =
///     websafe64::decode_bytes(b"Zm9v".iter().copied()).collect();
/// assert_eq!(bytes.unwrap(), b"foo");
/// ```
pub fn decode_bytes<I>(bytes: I) -> Decoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    Decoder::new(bytes.into_iter())
}

/// Decodes a sequence of [`char`]s.
pub fn decode_chars<I>(chars: I) -> Decoder<I::IntoIter>
where
    I: IntoIterator<Item = char>,
{
    Decoder::new(chars.into_iter())
}

/// Decodes a `str`.
pub fn decode_str(s: &str) -> Decoder<Chars<'_>> {
    decode_chars(s.chars())
}

/// Decodes `text` into a new [`Vec`].
///
/// ```
/// use websafe64::DecodeError;
///
/// assert_eq!(websafe64::decode_to_vec("Zg..").unwrap(), b"f");
/// assert_eq!(
///     websafe64::decode_to_vec("Zg=="),
///     Err(DecodeError::InvalidChar('=')),
/// );
/// ```
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec<T>(text: T) -> DecodeResult<Vec<u8>>
where
    T: AsRef<[u8]>,
{
    decode_bytes(text.as_ref().iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(s: &[u8; 4]) -> DecodeResult<([u8; 3], usize)> {
        decode_group(*s)
    }

    #[test]
    fn group_padding() {
        assert_eq!(group(b"Zm9v"), Ok((*b"foo", 3)));
        assert_eq!(group(b"Zm8."), Ok(([b'f', b'o', 0], 2)));
        assert_eq!(group(b"Zg.."), Ok(([b'f', 0, 0], 1)));
    }

    #[test]
    fn group_misplaced_padding() {
        assert_eq!(group(b"Z.8."), Err(Error::InvalidPadding));
        assert_eq!(group(b"Z..."), Err(Error::InvalidPadding));
        assert_eq!(group(b"...."), Err(Error::InvalidPadding));
        assert_eq!(group(b"Zm.v"), Err(Error::InvalidPadding));
    }

    #[test]
    fn group_invalid_char() {
        assert_eq!(group(b"Zm9+"), Err(Error::InvalidChar('+')));
        assert_eq!(group(b"Z/.."), Err(Error::InvalidChar('/')));
        assert_eq!(group(b"Zm8="), Err(Error::InvalidChar('=')));
        assert_eq!(group(b" Zm9"), Err(Error::InvalidChar(' ')));
    }

    #[test]
    fn padding_counts_at_most_two() {
        assert_eq!(padding_len(b"Zm9v"), 0);
        assert_eq!(padding_len(b"Zm8."), 1);
        assert_eq!(padding_len(b"Zg.."), 2);
        assert_eq!(padding_len(b"Z..."), 2);
        assert_eq!(padding_len(b"Zg.v"), 0);
    }

    #[test]
    fn ignores_fill_bits() {
        assert_eq!(group(b"Zh.."), Ok(([b'f', 0, 0], 1)));
    }

    #[test]
    fn capacity() {
        assert_eq!(decoded_capacity(0), 2);
        assert_eq!(decoded_capacity(4), 5);
        assert_eq!(decoded_capacity(7), 5);
        assert_eq!(decoded_capacity(8), 8);
    }

    #[test]
    fn decoder_stops_after_error() {
        let mut dec = decode_str("Zm9vZg..Zm9v");
        assert_eq!(dec.next(), Some(Ok(b'f')));
        assert_eq!(dec.next(), Some(Ok(b'o')));
        assert_eq!(dec.next(), Some(Ok(b'o')));
        assert_eq!(dec.next(), Some(Err(Error::InvalidPadding)));
        assert_eq!(dec.next(), None);
        assert_eq!(dec.next(), None);
    }

    #[test]
    fn non_ascii_char() {
        assert_eq!(
            decode_str("Zm9\u{e9}").collect::<DecodeResult<Vec<u8>>>(),
            Err(Error::InvalidChar('\u{e9}')),
        );
    }
}
