use std::{
    collections::HashMap,
    hash::{BuildHasher, DefaultHasher},
};

/// A [`BuildHasher`] that always starts from the same seed.
///
/// Two maps filled with the same keys in the same order hash identically in every process,
/// which keeps hash-indexed alignment storage reproducible between runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicDefaultHasher;

/// A [`HashMap`] keyed through [`DeterministicDefaultHasher`].
pub type DeterministicHashMap<Key, Value> = HashMap<Key, Value, DeterministicDefaultHasher>;

impl BuildHasher for DeterministicDefaultHasher {
    type Hasher = DefaultHasher;

    fn build_hasher(&self) -> Self::Hasher {
        DefaultHasher::new()
    }
}

#[cfg(test)]
mod tests {
    use std::hash::BuildHasher;

    use super::{DeterministicDefaultHasher, DeterministicHashMap};

    #[test]
    fn hashes_are_reproducible() {
        let first = DeterministicDefaultHasher.hash_one(42usize);
        let second = DeterministicDefaultHasher.hash_one(42usize);
        assert_eq!(first, second);
    }

    #[test]
    fn maps_iterate_in_the_same_order() {
        let mut first: DeterministicHashMap<usize, usize> = DeterministicHashMap::default();
        let mut second: DeterministicHashMap<usize, usize> = DeterministicHashMap::default();
        for key in [17, 3, 99, 4, 1000, 12] {
            first.insert(key, key * 2);
            second.insert(key, key * 2);
        }

        assert_eq!(
            first.iter().collect::<Vec<_>>(),
            second.iter().collect::<Vec<_>>()
        );
    }
}
