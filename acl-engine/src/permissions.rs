//! # Permissions
//!
//! Permission sets and the nested mappings built from them.
//! A permission is an opaque name for an operation allowed on a resource.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Resource → permission vocabulary, independent of who holds which grants.
///
/// Keys keep their first-insertion order. A resource mapped to an empty set
/// is known but has no permission vocabulary defined yet.
pub type Structure = IndexMap<String, PermissionSet>;

/// Resource → permissions granted to a single role.
pub type RoleGrants = IndexMap<String, PermissionSet>;

/// Role → resource → permissions: the authoritative record of who may do what.
pub type Grants = IndexMap<String, RoleGrants>;

/// A duplicate-free, sorted set of permission names.
///
/// Iteration and serialization always yield names in ascending order, so
/// listings and snapshots are deterministic.
///
/// # Example
///
/// ```
/// use acl_engine::permissions::PermissionSet;
///
/// let mut set = PermissionSet::new();
/// set.add("read");
/// set.add("create");
/// set.add("read");
///
/// assert!(set.has("read"));
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.to_vec(), vec!["create", "read"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: BTreeSet<String>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: BTreeSet::new(),
        }
    }

    /// Add a permission to the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was not already present
    pub fn add(&mut self, permission: impl Into<String>) -> bool {
        self.permissions.insert(permission.into())
    }

    /// Add multiple permissions to the set.
    pub fn add_all<I, S>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for perm in permissions {
            self.add(perm);
        }
    }

    /// Remove a permission from the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was present, `false` otherwise
    pub fn remove(&mut self, permission: &str) -> bool {
        self.permissions.remove(permission)
    }

    /// Check if the set contains a permission.
    pub fn has(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Iterate over the permissions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(String::as_str)
    }

    /// Collect the permissions into a sorted vector.
    pub fn to_vec(&self) -> Vec<String> {
        self.permissions.iter().cloned().collect()
    }

    /// Union another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.permissions.iter().cloned());
    }

    /// Remove every permission of `other` from this set.
    pub fn subtract(&mut self, other: &PermissionSet) {
        self.permissions.retain(|perm| !other.permissions.contains(perm));
    }

    /// Keep only the permissions also present in `other`.
    pub fn retain_common(&mut self, other: &PermissionSet) {
        self.permissions.retain(|perm| other.permissions.contains(perm));
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Clear all permissions.
    pub fn clear(&mut self) {
        self.permissions.clear();
    }

    /// Check if this set contains all permissions from another set.
    ///
    /// An empty `other` is always contained.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.permissions.is_subset(&self.permissions)
    }

    /// Check if this set shares at least one permission with another set.
    pub fn contains_any(&self, other: &PermissionSet) -> bool {
        !self.permissions.is_disjoint(&other.permissions)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        set.add_all(iter);
        set
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
