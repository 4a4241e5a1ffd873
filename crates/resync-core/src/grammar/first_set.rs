use std::fmt;

use super::LabelId;

/// Set of labels that can start a rule, as a 256-bit bitmap.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstSet([u8; 32]);

impl FirstSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, label: LabelId) {
        self.0[(label >> 3) as usize] |= 1 << (label & 7);
    }

    #[inline]
    pub fn contains(&self, label: LabelId) -> bool {
        self.0[(label >> 3) as usize] & (1 << (label & 7)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = LabelId> + '_ {
        (0..=LabelId::MAX).filter(move |&label| self.contains(label))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromIterator<LabelId> for FirstSet {
    fn from_iter<I: IntoIterator<Item = LabelId>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl fmt::Debug for FirstSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
