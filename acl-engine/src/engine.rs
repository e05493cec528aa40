//! # Engine
//!
//! The [`Acl`] aggregate: role registry, resource/permission structure and
//! grants table, plus the operations that manage and query them.
//!
//! All nested mutation goes through [`DeepMerge`] and [`DeepDiff`]. Queries
//! on unknown roles, resources or permissions answer `false` or empty
//! rather than failing.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::permissions::{Grants, PermissionSet, RoleGrants, Structure};
use crate::policy::Policy;
use crate::selector::{Names, Selector};
use crate::set_ops::{fill, DeepDiff, DeepMerge, Removal};

/// An in-memory access-control list.
///
/// Single-owner and synchronous; hosts sharing one instance across threads
/// wrap it in their own lock.
///
/// # Example
///
/// ```
/// use acl_engine::{Acl, Selector};
///
/// let mut acl = Acl::new();
/// acl.grant(Selector::permissions("user", "/page", "read"));
///
/// assert!(acl.check(Selector::permissions("user", "/page", "read")));
/// assert!(!acl.check(Selector::permissions("user", "/page", "write")));
/// assert_eq!(acl.list_resources(), vec!["/page"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acl {
    /// Registered roles, in first-insertion order.
    roles: IndexSet<String>,
    /// Resource → permission vocabulary.
    structure: Structure,
    /// Role → resource → granted permissions.
    grants: Grants,
}

impl Acl {
    /// Create an empty ACL.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------- Structure: create ----------

    /// Register role(s). Existing roles are neither duplicated nor moved.
    pub fn add_role(&mut self, roles: impl Names) -> &mut Self {
        let roles = roles.into_names();
        debug!(roles = ?roles, "Adding roles");
        self.roles.extend(roles);
        self
    }

    /// Register resource(s) without any permission vocabulary.
    pub fn add_resource(&mut self, resources: impl Names) -> &mut Self {
        self.add(&fill(resources.into_names(), PermissionSet::new()))
    }

    /// Register permission(s) on every one of the named resource(s).
    pub fn add_permission(&mut self, resources: impl Names, permissions: impl Names) -> &mut Self {
        let permissions: PermissionSet = permissions.into_names().into_iter().collect();
        self.add(&fill(resources.into_names(), permissions))
    }

    /// Merge a whole resource → permissions structure.
    pub fn add(&mut self, structure: &Structure) -> &mut Self {
        debug!(resources = ?structure.keys().collect::<Vec<_>>(), "Adding structure");
        self.structure.deep_merge(structure);
        self
    }

    // ---------- Structure: remove ----------

    /// Remove role(s) from the registry along with all of their grants.
    pub fn remove_role(&mut self, roles: impl Names) -> &mut Self {
        let roles = roles.into_names();
        debug!(roles = ?roles, "Removing roles");
        for role in &roles {
            self.roles.shift_remove(role);
        }
        self.grants.deep_diff(&fill(roles, Removal::Entire));
        self
    }

    /// Remove resource(s) from the structure and from every role's grants.
    pub fn remove_resource(&mut self, resources: impl Names) -> &mut Self {
        let removal = fill(resources.into_names(), Removal::Entire);
        debug!(resources = ?removal.keys().collect::<Vec<_>>(), "Removing resources");
        self.structure.deep_diff(&removal);
        self.diff_every_role(removal);
        self
    }

    /// Remove permission(s) from resource(s), in the structure and in every
    /// role's grants.
    ///
    /// A resource whose last permission goes stays known in the structure
    /// with an empty vocabulary; in a role's grants it is dropped.
    pub fn remove_permission(&mut self, resources: impl Names, permissions: impl Names) -> &mut Self {
        let resources = resources.into_names();
        let permissions: PermissionSet = permissions.into_names().into_iter().collect();
        debug!(resources = ?resources, permissions = ?permissions, "Removing permissions");

        // Leaf diffs only: the mapping-level diff would prune emptied
        // resources, and the structure must keep them.
        for resource in &resources {
            if let Some(vocabulary) = self.structure.get_mut(resource) {
                vocabulary.deep_diff(&permissions);
            }
        }
        self.diff_every_role(fill(resources, Removal::Part(permissions)));
        self
    }

    /// Apply the same per-resource removal to every role holding grants.
    fn diff_every_role(&mut self, removal: <RoleGrants as DeepDiff>::Mask) {
        let roles: Vec<String> = self.grants.keys().cloned().collect();
        self.grants.deep_diff(&fill(roles, Removal::Part(removal)));
    }

    // ---------- Structure: list ----------

    /// Registered roles, in first-insertion order.
    pub fn list_roles(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }

    /// Known resources, including those with no permissions defined.
    pub fn list_resources(&self) -> Vec<String> {
        self.structure.keys().cloned().collect()
    }

    /// Union of the permissions defined on the named resource(s).
    ///
    /// Permissions appear in the order first met, walking the resources in
    /// the order given. Unknown resources contribute nothing.
    pub fn list_permissions(&self, resources: impl Names) -> Vec<String> {
        unique_permissions(self.list_for(resources).values())
    }

    /// Union of the permissions defined on every known resource.
    pub fn list_all_permissions(&self) -> Vec<String> {
        unique_permissions(self.structure.values())
    }

    /// The whole resource → permissions structure.
    pub fn list(&self) -> &Structure {
        &self.structure
    }

    /// The structure restricted to the named resource(s) that exist.
    pub fn list_for(&self, resources: impl Names) -> Structure {
        pick(&self.structure, resources.into_names())
    }

    // ---------- Grant / revoke ----------

    /// Grant to the selected role(s).
    ///
    /// Roles, resources and permissions named are registered first; then
    /// every role receives the same resource → permissions grant.
    /// `Selector::ByRolesAndResources` grants presence on the resources
    /// (empty permission sets) and `Selector::ByRoles` just opens an empty
    /// grants entry for each role.
    pub fn grant(&mut self, selector: Selector) -> &mut Self {
        let roles = selector.role_names().to_vec();
        let grants = selector.requirements().unwrap_or_default();
        debug!(roles = ?roles, resources = ?grants.keys().collect::<Vec<_>>(), "Granting");

        self.add_role(roles.as_slice());
        self.add(&grants);
        self.grants.deep_merge(&fill(roles, grants));
        self
    }

    /// Merge a complete role → resource → permissions table into the grants.
    ///
    /// Unlike [`Acl::grant`], nothing is registered in the role registry or
    /// the structure.
    pub fn grant_all(&mut self, grants: &Grants) -> &mut Self {
        debug!(roles = ?grants.keys().collect::<Vec<_>>(), "Granting full mapping");
        self.grants.deep_merge(grants);
        self
    }

    /// Revoke from the selected role(s).
    ///
    /// - `ByRoles`: the roles lose their grants entry entirely
    /// - `ByRolesAndResources`: the named resources are dropped, the role
    ///   entries stay (possibly empty)
    /// - `ByRolesResourcesPermissions` / `ByGrantsMapping`: only the named
    ///   permissions go; resources left without permissions are dropped
    ///
    /// Unknown roles and resources are ignored.
    pub fn revoke(&mut self, selector: Selector) -> &mut Self {
        let removal = selector.removal();
        debug!(roles = ?selector.role_names(), "Revoking");
        self.grants
            .deep_diff(&fill(selector.role_names().iter().cloned(), removal));
        self
    }

    /// Drop every grant. The role registry and the structure are untouched.
    pub fn revoke_all(&mut self) -> &mut Self {
        debug!(role_count = self.grants.len(), "Revoking all grants");
        self.grants.clear();
        self
    }

    // ---------- Authorize ----------

    /// Conjunctive check: every selected role must hold every selected
    /// resource with at least the selected permissions.
    ///
    /// With `Selector::ByRoles` it only asks whether each role has a grants
    /// entry at all. An empty requirement is satisfied by any role that has
    /// a grants entry.
    pub fn check(&self, selector: Selector) -> bool {
        let roles = selector.role_names();
        let allowed = match selector.requirements() {
            None => roles.iter().all(|role| self.grants.contains_key(role)),
            Some(required) => roles.iter().all(|role| {
                self.grants.get(role).is_some_and(|held| {
                    required.iter().all(|(resource, needed)| {
                        held.get(resource)
                            .is_some_and(|granted| granted.contains_all(needed))
                    })
                })
            }),
        };
        trace!(roles = ?roles, allowed, "check");
        allowed
    }

    /// Disjunctive check: any selected role holding any selected resource
    /// with any of the selected permissions is enough.
    ///
    /// A resource required with no permissions matches on presence alone.
    /// An empty requirement is vacuously satisfied, whatever the roles.
    pub fn check_any(&self, selector: Selector) -> bool {
        let roles = selector.role_names();
        let allowed = match selector.requirements() {
            None => roles.iter().any(|role| self.grants.contains_key(role)),
            Some(required) if required.is_empty() => true,
            Some(required) => roles.iter().any(|role| {
                self.grants.get(role).is_some_and(|held| {
                    required.iter().any(|(resource, wanted)| {
                        held.get(resource).is_some_and(|granted| {
                            wanted.is_empty() || granted.contains_any(wanted)
                        })
                    })
                })
            }),
        };
        trace!(roles = ?roles, allowed, "check_any");
        allowed
    }

    // ---------- Show ----------

    /// Grants every one of the role(s) holds (intersection).
    ///
    /// A resource is kept only if all roles hold it, with the permissions
    /// they hold in common; resources left with nothing in common are
    /// dropped. Any unknown role empties the result.
    pub fn which(&self, roles: impl Names) -> RoleGrants {
        let mut roles = roles.into_names();
        let Some(last) = roles.pop() else {
            return RoleGrants::new();
        };
        let Some(held) = self.grants.get(&last) else {
            return RoleGrants::new();
        };

        let mut common = held.clone();
        for role in &roles {
            let Some(held) = self.grants.get(role) else {
                return RoleGrants::new();
            };
            common.retain(|resource, perms| match held.get(resource) {
                Some(granted) => {
                    perms.retain_common(granted);
                    !perms.is_empty()
                }
                None => false,
            });
        }
        common
    }

    /// Grants any of the role(s) holds (union). Unknown roles contribute
    /// nothing.
    pub fn which_any(&self, roles: impl Names) -> RoleGrants {
        let mut merged = RoleGrants::new();
        for held in pick(&self.grants, roles.into_names()).values() {
            merged.deep_merge(held);
        }
        merged
    }

    /// The whole grants table.
    pub fn show(&self) -> &Grants {
        &self.grants
    }

    /// The grants table restricted to the named role(s) that hold grants.
    pub fn show_for(&self, roles: impl Names) -> Grants {
        pick(&self.grants, roles.into_names())
    }

    /// Capture the current state as a [`Policy`] that rebuilds it.
    pub fn snapshot(&self) -> Policy {
        Policy {
            roles: self.list_roles(),
            structure: self.structure.clone(),
            grants: self.grants.clone(),
        }
    }
}

/// Copy the entries of `map` whose keys are named, in the order named.
fn pick<V: Clone>(map: &IndexMap<String, V>, keys: Vec<String>) -> IndexMap<String, V> {
    keys.into_iter()
        .filter_map(|key| map.get(&key).map(|value| (key, value.clone())))
        .collect()
}

fn unique_permissions<'a>(sets: impl Iterator<Item = &'a PermissionSet>) -> Vec<String> {
    let seen: IndexSet<&str> = sets.flat_map(PermissionSet::iter).collect();
    seen.into_iter().map(str::to_string).collect()
}
