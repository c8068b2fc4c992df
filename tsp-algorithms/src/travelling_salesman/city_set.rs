use serde::{Deserialize, Serialize};

/// Widest city count a `CitySet` can describe.
pub const MAX_CITIES: usize = u64::BITS as usize;

/// Set of city indices packed into a bitmask, bit `i` set meaning city `i`
/// is a member.
///
/// Ordering is the plain numeric ordering of the mask, which the open set
/// relies on for its last tie-break.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct CitySet(pub u64);

impl CitySet {
    pub const EMPTY: CitySet = CitySet(0);

    pub fn single(city: usize) -> Self {
        CitySet(1 << city)
    }

    /// All of `0..num_cities`.
    pub fn full(num_cities: usize) -> Self {
        if num_cities >= MAX_CITIES {
            CitySet(u64::MAX)
        } else {
            CitySet((1u64 << num_cities) - 1)
        }
    }

    #[inline]
    pub fn contains(self, city: usize) -> bool {
        self.0 & (1 << city) != 0
    }

    #[inline]
    pub fn with(self, city: usize) -> Self {
        CitySet(self.0 | (1 << city))
    }

    /// Members of `full` missing from `self`. `self` must be a subset of `full`.
    #[inline]
    pub fn complement_in(self, full: CitySet) -> Self {
        CitySet(full.0 ^ self.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending index order.
    pub fn iter(self) -> Cities {
        Cities(self.0)
    }
}

impl FromIterator<usize> for CitySet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        iter.into_iter().fold(CitySet::EMPTY, CitySet::with)
    }
}

pub struct Cities(u64);

impl Iterator for Cities {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let city = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(city)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cities {}
