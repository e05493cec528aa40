//! # Set Operations
//!
//! Deep merge and deep diff over nested, string-keyed mappings whose leaves
//! are [`PermissionSet`]s. These are the only mutators of nested ACL state:
//! every structure, grant and revoke operation is expressed as a merge or a
//! diff against a mapping built with [`fill`].
//!
//! ```text
//! deep_merge:  leaf ∪ leaf, mapping → recurse (missing keys created)
//! deep_diff:   leaf ∖ leaf (emptied leaves dropped), Removal::Entire → key dropped,
//!              mapping → recurse (emptied mappings kept)
//! ```

use indexmap::IndexMap;

use crate::permissions::PermissionSet;

/// Build a mapping that assigns a copy of `value` to every key.
///
/// Duplicate keys collapse onto their first position.
///
/// # Example
///
/// ```
/// use acl_engine::permissions::PermissionSet;
/// use acl_engine::set_ops::fill;
///
/// let perms: PermissionSet = ["read"].into_iter().collect();
/// let map = fill(["/page", "/blog", "/page"], perms);
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/page", "/blog"]);
/// assert!(map["/blog"].has("read"));
/// ```
pub fn fill<I, K, V>(keys: I, value: V) -> IndexMap<String, V>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
    V: Clone,
{
    keys.into_iter()
        .map(|key| (key.into(), value.clone()))
        .collect()
}

/// Destination-mutating, monotonic union.
pub trait DeepMerge {
    /// Merge `src` into `self`; never removes anything already present.
    fn deep_merge(&mut self, src: &Self);
}

impl DeepMerge for PermissionSet {
    fn deep_merge(&mut self, src: &Self) {
        self.merge(src);
    }
}

impl<V> DeepMerge for IndexMap<String, V>
where
    V: DeepMerge + Default,
{
    fn deep_merge(&mut self, src: &Self) {
        for (key, value) in src {
            self.entry(key.clone()).or_default().deep_merge(value);
        }
    }
}

/// What to take out of a single key during a [`DeepDiff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<M> {
    /// Drop the key and everything under it.
    Entire,
    /// Diff the value under the key with the given mask.
    Part(M),
}

/// Destination-mutating difference; only ever removes or empties.
pub trait DeepDiff {
    /// The shape of a removal request against `Self`.
    type Mask;

    /// Remove `mask` from `self`.
    fn deep_diff(&mut self, mask: &Self::Mask);

    /// Whether the key holding this value should go away after a diff.
    ///
    /// Leaves are dropped once empty; nested mappings stay, even when empty.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl DeepDiff for PermissionSet {
    type Mask = PermissionSet;

    fn deep_diff(&mut self, mask: &Self::Mask) {
        self.subtract(mask);
    }

    fn is_exhausted(&self) -> bool {
        self.is_empty()
    }
}

impl<V> DeepDiff for IndexMap<String, V>
where
    V: DeepDiff,
{
    type Mask = IndexMap<String, Removal<V::Mask>>;

    fn deep_diff(&mut self, mask: &Self::Mask) {
        for (key, removal) in mask {
            let exhausted = match (removal, self.get_mut(key)) {
                (_, None) => continue,
                (Removal::Entire, Some(_)) => true,
                (Removal::Part(inner), Some(value)) => {
                    value.deep_diff(inner);
                    value.is_exhausted()
                }
            };
            if exhausted {
                self.shift_remove(key);
            }
        }
    }
}
