//! Resolution of string keys to the records carrying them.
//!
//! Records point at each other by human readable strings (a title, a name)
//! rather than by identifiers. Resolving a list of keys walks the keys in
//! order and collects **every** record whose key matches, so a key shared by
//! several records yields all of them and a key matching nothing is skipped.

use multimap::MultiMap;

/// A record addressable by a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Resolves `keys` against `target` with a linear scan per key.
///
/// The output is ordered by `keys` first, then by position in `target`.
pub fn resolve_references<'a, T, S>(keys: &[S], target: &'a [T]) -> Vec<&'a T>
where
    T: Keyed,
    S: AsRef<str>,
{
    let mut resolved = Vec::with_capacity(keys.len());
    for key in keys {
        let key = key.as_ref();
        resolved.extend(target.iter().filter(|record| record.key() == key));
    }
    resolved
}

/// Positions of records by key, built once over a collection that never
/// changes afterwards.
///
/// [`KeyIndex::resolve`] returns exactly what [`resolve_references`] returns
/// for the same collection, without rescanning it for every key.
#[derive(Debug, Default)]
pub struct KeyIndex {
    positions: MultiMap<String, usize>,
}

impl KeyIndex {
    pub fn build<T: Keyed>(records: &[T]) -> Self {
        let mut positions = MultiMap::new();
        for (position, record) in records.iter().enumerate() {
            positions.insert(record.key().to_owned(), position);
        }
        Self { positions }
    }

    /// `records` must be the collection the index was built from.
    pub fn resolve<'a, T, S>(&self, keys: &[S], records: &'a [T]) -> Vec<&'a T>
    where
        S: AsRef<str>,
    {
        let mut resolved = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(positions) = self.positions.get_vec(key.as_ref()) {
                resolved.extend(positions.iter().filter_map(|&p| records.get(p)));
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Named(&'static str, u32);

    impl Keyed for Named {
        fn key(&self) -> &str {
            self.0
        }
    }

    fn target() -> Vec<Named> {
        vec![
            Named("a", 1),
            Named("b", 2),
            Named("a", 3),
            Named("c", 4),
        ]
    }

    #[test]
    fn every_match_is_returned_in_key_order() {
        let target = target();
        let resolved = resolve_references(&["c", "a"], &target);
        assert_eq!(resolved, [&Named("c", 4), &Named("a", 1), &Named("a", 3)]);
    }

    #[test]
    fn unmatched_keys_are_skipped() {
        let target = target();
        let resolved = resolve_references(&["z", "b", "y"], &target);
        assert_eq!(resolved, [&Named("b", 2)]);
        assert!(resolve_references::<Named, &str>(&[], &target).is_empty());
    }

    #[test]
    fn repeated_keys_repeat_their_matches() {
        let target = target();
        let resolved = resolve_references(&["b", "b"], &target);
        assert_eq!(resolved, [&Named("b", 2), &Named("b", 2)]);
    }

    #[test]
    fn matching_is_exact() {
        let target = target();
        assert!(resolve_references(&["A", " a", "a "], &target).is_empty());
    }

    #[test]
    fn index_matches_linear_scan() {
        let target = target();
        let index = KeyIndex::build(&target);
        for keys in [
            vec!["a"],
            vec!["c", "a"],
            vec!["a", "a"],
            vec!["z", "b"],
            vec![],
        ] {
            assert_eq!(
                index.resolve(&keys, &target),
                resolve_references(&keys, &target),
                "keys: {keys:?}"
            );
        }
    }
}
