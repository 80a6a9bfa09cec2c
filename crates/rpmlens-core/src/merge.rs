//! Merging of entities contributed by several repository versions.
//!
//! The same logical group can be stored once per version that carries it.
//! [`merge_distinct`] folds those occurrences into one entity per key whose
//! member list is the union of all occurrences.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

use rpmlens_db::models::{EnvironmentItem, PackageGroupItem};

/// An entity with a logical key and a set of members.
pub trait Mergeable {
    type Key: Eq + Hash;

    fn merge_key(&self) -> Self::Key;

    fn members_mut(&mut self) -> &mut Vec<String>;
}

impl Mergeable for PackageGroupItem {
    type Key = (String, String);

    fn merge_key(&self) -> Self::Key {
        (self.name.clone(), self.id.clone())
    }

    fn members_mut(&mut self) -> &mut Vec<String> {
        &mut self.packages
    }
}

impl Mergeable for EnvironmentItem {
    type Key = (String, String);

    fn merge_key(&self) -> Self::Key {
        (self.name.clone(), self.id.clone())
    }

    fn members_mut(&mut self) -> &mut Vec<String> {
        &mut self.groups
    }
}

/// Merges occurrences sharing a key, then keeps the first `limit` entities.
///
/// Entities stay in the order their key first appeared; members stay in the
/// order they were first seen and appear once.
pub fn merge_distinct<T, I>(items: I, limit: usize) -> Vec<T>
where
    T: Mergeable,
    I: IntoIterator<Item = T>,
{
    let mut positions: HashMap<T::Key, usize> = HashMap::new();
    let mut merged: Vec<(T, HashSet<String>)> = Vec::new();

    for mut item in items {
        let incoming = std::mem::take(item.members_mut());

        let idx = *positions.entry(item.merge_key()).or_insert_with(|| {
            merged.push((item, HashSet::new()));
            merged.len() - 1
        });

        let (entity, seen) = &mut merged[idx];
        for member in incoming {
            if seen.insert(member.clone()) {
                entity.members_mut().push(member);
            }
        }
    }

    merged.truncate(limit);
    merged.into_iter().map(|(entity, _)| entity).collect()
}
