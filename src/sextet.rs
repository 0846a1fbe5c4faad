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

use super::table::{DECODE, ENCODE};

/// A 6-bit value. Always less than 64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sextet(u8);

impl Sextet {
    pub const fn new(x: u8) -> Option<Self> {
        if x < 64 {
            Some(Self(x))
        } else {
            None
        }
    }

    /// Keeps the low 6 bits of `x`.
    pub const fn from_low_bits(x: u32) -> Self {
        Self((x & 0x3f) as u8)
    }

    /// Looks up the data symbol `c`. Returns `None` for every byte outside the
    /// alphabet, padding included.
    pub fn from_symbol(c: u8) -> Option<Self> {
        Self::new(DECODE[usize::from(c)])
    }

    pub fn symbol(self) -> u8 {
        ENCODE[usize::from(self.0)]
    }
}

impl From<Sextet> for u32 {
    fn from(s: Sextet) -> u32 {
        u32::from(s.0)
    }
}
