//! # Selectors
//!
//! Call shapes accepted by grant, revoke and the authorization checks.
//!
//! Every operation that can be addressed "by roles", "by roles and
//! resources", "by roles, resources and permissions" or "by an explicit
//! resource → permissions mapping" takes a [`Selector`]. Each shape is
//! normalized to the same internal form before it reaches the engine.

use crate::permissions::{PermissionSet, RoleGrants};
use crate::set_ops::{fill, DeepDiff, Removal};

/// Removal request against a single role's grants.
pub type GrantsRemoval = Removal<<RoleGrants as DeepDiff>::Mask>;

/// One or many identifiers (roles, resources or permissions).
///
/// Implemented for single names (`&str`, `String`) and for arrays, slices
/// and vectors of names, so callers never have to wrap a lone name.
///
/// # Example
///
/// ```
/// use acl_engine::selector::Names;
///
/// assert_eq!("root".into_names(), vec!["root"]);
/// assert_eq!(["user", "poweruser"].into_names(), vec!["user", "poweruser"]);
/// assert_eq!(vec!["a".to_string()].into_names(), vec!["a"]);
/// ```
pub trait Names {
    /// Convert into an owned list of names, in the order given.
    fn into_names(self) -> Vec<String>;
}

impl Names for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Names for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl Names for &String {
    fn into_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> Names for Vec<S> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> Names for [S; N] {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> Names for &[S] {
    fn into_names(self) -> Vec<String> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Addresses a slice of the grants table.
///
/// # Example
///
/// ```
/// use acl_engine::selector::Selector;
///
/// let all_of_user = Selector::roles("user");
/// let pages = Selector::resources(["user", "admin"], ["/page", "/profile"]);
/// let read_page = Selector::permissions("user", "/page", ["read", "edit"]);
///
/// assert_eq!(all_of_user.role_names(), ["user"]);
/// assert_eq!(pages.role_names(), ["user", "admin"]);
/// assert!(read_page.requirements().unwrap()["/page"].has("edit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Everything held by the roles.
    ByRoles {
        /// Roles addressed.
        roles: Vec<String>,
    },

    /// The named resources, with whatever permissions the roles hold on them.
    ByRolesAndResources {
        /// Roles addressed.
        roles: Vec<String>,
        /// Resources addressed.
        resources: Vec<String>,
    },

    /// The same permissions on every named resource.
    ByRolesResourcesPermissions {
        /// Roles addressed.
        roles: Vec<String>,
        /// Resources addressed.
        resources: Vec<String>,
        /// Permissions addressed on each resource.
        permissions: PermissionSet,
    },

    /// An explicit resource → permissions mapping.
    ByGrantsMapping {
        /// Roles addressed.
        roles: Vec<String>,
        /// Per-resource permissions.
        grants: RoleGrants,
    },
}

impl Selector {
    /// Select everything held by `roles`.
    pub fn roles(roles: impl Names) -> Self {
        Selector::ByRoles {
            roles: roles.into_names(),
        }
    }

    /// Select `resources` as held by `roles`.
    pub fn resources(roles: impl Names, resources: impl Names) -> Self {
        Selector::ByRolesAndResources {
            roles: roles.into_names(),
            resources: resources.into_names(),
        }
    }

    /// Select `permissions` on each of `resources` as held by `roles`.
    pub fn permissions(roles: impl Names, resources: impl Names, permissions: impl Names) -> Self {
        Selector::ByRolesResourcesPermissions {
            roles: roles.into_names(),
            resources: resources.into_names(),
            permissions: permissions.into_names().into_iter().collect(),
        }
    }

    /// Select an explicit resource → permissions mapping as held by `roles`.
    pub fn grants(roles: impl Names, grants: RoleGrants) -> Self {
        Selector::ByGrantsMapping {
            roles: roles.into_names(),
            grants,
        }
    }

    /// The roles this selector addresses.
    pub fn role_names(&self) -> &[String] {
        match self {
            Selector::ByRoles { roles }
            | Selector::ByRolesAndResources { roles, .. }
            | Selector::ByRolesResourcesPermissions { roles, .. }
            | Selector::ByGrantsMapping { roles, .. } => roles,
        }
    }

    /// Normalize to a resource → required permissions mapping.
    ///
    /// Resources named without permissions map to an empty set, meaning
    /// presence of the resource is enough. `ByRoles` has no resource
    /// component and yields `None`.
    pub fn requirements(&self) -> Option<RoleGrants> {
        match self {
            Selector::ByRoles { .. } => None,
            Selector::ByRolesAndResources { resources, .. } => {
                Some(fill(resources.iter().cloned(), PermissionSet::new()))
            }
            Selector::ByRolesResourcesPermissions {
                resources,
                permissions,
                ..
            } => Some(fill(resources.iter().cloned(), permissions.clone())),
            Selector::ByGrantsMapping { grants, .. } => Some(grants.clone()),
        }
    }

    /// Normalize to what must be taken out of each addressed role's grants.
    ///
    /// `ByRoles` drops the roles' entries altogether, `ByRolesAndResources`
    /// drops the named resources, the remaining shapes take out only the
    /// named permissions.
    pub fn removal(&self) -> GrantsRemoval {
        match self {
            Selector::ByRoles { .. } => Removal::Entire,
            Selector::ByRolesAndResources { resources, .. } => {
                Removal::Part(fill(resources.iter().cloned(), Removal::Entire))
            }
            Selector::ByRolesResourcesPermissions {
                resources,
                permissions,
                ..
            } => Removal::Part(fill(
                resources.iter().cloned(),
                Removal::Part(permissions.clone()),
            )),
            Selector::ByGrantsMapping { grants, .. } => Removal::Part(
                grants
                    .iter()
                    .map(|(resource, perms)| (resource.clone(), Removal::Part(perms.clone())))
                    .collect(),
            ),
        }
    }
}
