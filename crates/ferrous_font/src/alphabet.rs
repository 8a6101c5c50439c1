//! The fixed set of code points a font is baked for.

use std::collections::HashMap;

/// Characters appended to printable ASCII by [`Alphabet::default`].
const LATIN_EXTRAS: &[char] = &['€', '£', '¥', '©', '°', '±', '×', '÷', '·'];

/// Ordered list of supported code points plus a code point → slot table.
///
/// Storage order is the order glyph records are kept in; the lookup table is
/// generated from it so no string encoding is involved in indexing. Space is
/// always present at slot 0 unless the caller listed it elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    code_points: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from `chars`, dropping duplicates (first occurrence
    /// wins) and inserting `' '` at the front if it is missing.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut code_points = Vec::new();
        let mut index = HashMap::new();
        for c in chars {
            if !index.contains_key(&c) {
                index.insert(c, code_points.len());
                code_points.push(c);
            }
        }
        if !index.contains_key(&' ') {
            code_points.insert(0, ' ');
            for slot in index.values_mut() {
                *slot += 1;
            }
            index.insert(' ', 0);
        }
        Self { code_points, index }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    /// Always `false`: space is a member of every alphabet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    #[inline]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<char> {
        self.code_points.get(slot).copied()
    }

    /// Slot of the space glyph.
    #[inline]
    pub fn space_index(&self) -> usize {
        self.index[&' ']
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.code_points.iter().copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.code_points
    }
}

impl Default for Alphabet {
    /// Printable ASCII followed by a few Latin-1 and currency symbols.
    fn default() -> Self {
        Self::new((' '..='~').chain(LATIN_EXTRAS.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_ascii_and_extras() {
        let a = Alphabet::default();
        assert_eq!(a.len(), 95 + LATIN_EXTRAS.len());
        assert_eq!(a.index_of(' '), Some(0));
        assert_eq!(a.index_of('A'), Some('A' as usize - 0x20));
        assert!(a.contains('€'));
        assert!(!a.contains('\u{4e2d}'));
    }

    #[test]
    fn space_is_inserted_and_indices_shift() {
        let a = Alphabet::new("AB".chars());
        assert_eq!(a.as_slice(), &[' ', 'A', 'B']);
        assert_eq!(a.index_of('A'), Some(1));
        assert_eq!(a.index_of('B'), Some(2));
        assert_eq!(a.space_index(), 0);
    }

    #[test]
    fn duplicates_keep_first_slot() {
        let a = Alphabet::new("x yx".chars());
        assert_eq!(a.as_slice(), &['x', ' ', 'y']);
        assert_eq!(a.space_index(), 1);
        for (slot, c) in a.iter().enumerate() {
            assert_eq!(a.index_of(c), Some(slot));
            assert_eq!(a.get(slot), Some(c));
        }
    }
}
