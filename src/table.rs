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

use super::{ALPHABET, PAD};

/// Marks bytes in [`DECODE`] that aren't data symbols.
pub const INVALID: u8 = 0xff;

pub static ENCODE: [u8; 64] = *ALPHABET;

pub static DECODE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    // The padding symbol is not a data symbol; the decoder checks for it
    // separately.
    assert!(table[PAD as usize] == INVALID);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_symbols_are_distinct() {
        let mut seen = [false; 256];
        for &c in &ENCODE {
            assert!(!seen[usize::from(c)], "duplicate symbol {:?}", c as char);
            seen[usize::from(c)] = true;
        }
        assert!(!seen[usize::from(PAD)]);
    }

    #[test]
    fn decode_inverts_encode() {
        for (i, &c) in ENCODE.iter().enumerate() {
            assert_eq!(usize::from(DECODE[usize::from(c)]), i);
        }
    }

    #[test]
    fn decode_rejects_everything_else() {
        let valid = DECODE.iter().filter(|&&v| v != INVALID).count();
        assert_eq!(valid, 64);
        for c in [b'+', b'/', b'=', b'.', b' ', b'\n', b'\r', b'\t', 0, 0x80] {
            assert_eq!(DECODE[usize::from(c)], INVALID, "{:?}", c as char);
        }
    }

    #[test]
    fn symbols_are_url_safe() {
        assert!(ENCODE
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || *c == b'-' || *c == b'_'));
    }
}
