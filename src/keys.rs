//! Chromatic topology of a piano keyboard.
//!
//! Key indices run left to right starting at C. Nothing outside this module
//! hardcodes which notes are white or black.

/// Zero-based key position, left to right.
pub type KeyIndex = usize;

pub const NOTES_PER_OCTAVE: usize = 12;

pub const MIN_NUMBER_OF_KEYS: usize = 1;
pub const MAX_NUMBER_OF_KEYS: usize = 88;

/// Offsets of the white keys within one octave (C D E F G A B).
pub const WHITE_KEY_OFFSETS: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];
/// Offsets of the black keys within one octave (C# D# F# G# A#).
pub const BLACK_KEY_OFFSETS: [usize; 5] = [1, 3, 6, 8, 10];

const IS_WHITE: [bool; NOTES_PER_OCTAVE] = [
    true, false, true, false, true, true, false, true, false, true, false, true,
];

#[inline]
pub fn is_white(index: KeyIndex) -> bool {
    IS_WHITE[index % NOTES_PER_OCTAVE]
}

#[inline]
pub fn is_black(index: KeyIndex) -> bool {
    !is_white(index)
}

#[inline]
pub fn octave_of(index: KeyIndex) -> usize {
    index / NOTES_PER_OCTAVE
}

/// Absolute index of the `ordinal`-th white key.
#[inline]
pub fn white_key_index(ordinal: usize) -> KeyIndex {
    let n = WHITE_KEY_OFFSETS.len();
    WHITE_KEY_OFFSETS[ordinal % n] + (ordinal / n) * NOTES_PER_OCTAVE
}

/// Absolute index of the `ordinal`-th black key.
#[inline]
pub fn black_key_index(ordinal: usize) -> KeyIndex {
    let n = BLACK_KEY_OFFSETS.len();
    BLACK_KEY_OFFSETS[ordinal % n] + (ordinal / n) * NOTES_PER_OCTAVE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCounts {
    pub white: usize,
    pub black: usize,
}

impl KeyCounts {
    pub fn total(&self) -> usize {
        self.white + self.black
    }
}

pub fn count_keys(number_of_keys: usize) -> KeyCounts {
    let white = (0..number_of_keys).filter(|&i| is_white(i)).count();
    KeyCounts {
        white,
        black: number_of_keys - white,
    }
}
