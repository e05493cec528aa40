//! Policy documents
//!
//! A [`Policy`] is the serializable form of an ACL: the role registry, the
//! resource/permission structure and the grants table. Hosts load one from
//! configuration to seed an engine, and persist [`Acl::snapshot`] to keep
//! its state across restarts.
//!
//! ```json
//! {
//!   "roles": ["admin", "user"],
//!   "structure": { "/page": ["read", "edit"] },
//!   "grants": { "user": { "/page": ["read"] } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::engine::Acl;
use crate::error::{AclError, AclResult};
use crate::permissions::{Grants, Structure};

/// Environment variable naming the policy file read by [`Policy::from_env`].
pub const POLICY_PATH_ENV: &str = "ACL_POLICY_PATH";

/// Serializable ACL state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Roles to register, in order.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Resource → permission vocabulary.
    #[serde(default)]
    pub structure: Structure,

    /// Role → resource → permissions granted.
    #[serde(default)]
    pub grants: Grants,
}

impl Policy {
    /// Parse a policy from a JSON document.
    pub fn from_json(json: &str) -> AclResult<Self> {
        let policy: Policy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read and parse a policy file.
    pub fn from_file(path: impl AsRef<Path>) -> AclResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AclError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let policy = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            roles = policy.roles.len(),
            resources = policy.structure.len(),
            granted_roles = policy.grants.len(),
            "Loaded ACL policy"
        );
        Ok(policy)
    }

    /// Read the policy file named by `ACL_POLICY_PATH`.
    pub fn from_env() -> AclResult<Self> {
        let path = std::env::var(POLICY_PATH_ENV)
            .map_err(|_| AclError::MissingEnvVar(POLICY_PATH_ENV.to_string()))?;
        Self::from_file(path)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> AclResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the document against the ACL invariants.
    ///
    /// Rejects blank role, resource or permission names and roles listed
    /// more than once.
    pub fn validate(&self) -> AclResult<()> {
        match self.find_violation() {
            Some(violation) => {
                warn!(violation = %violation, "Rejected ACL policy");
                Err(AclError::InvalidPolicy(violation))
            }
            None => Ok(()),
        }
    }

    fn find_violation(&self) -> Option<String> {
        let mut seen = HashSet::new();
        for (i, role) in self.roles.iter().enumerate() {
            if role.trim().is_empty() {
                return Some(format!("blank role name at position {}", i));
            }
            if !seen.insert(role.as_str()) {
                return Some(format!("role `{}` listed more than once", role));
            }
        }

        let resources = self
            .structure
            .iter()
            .chain(self.grants.values().flat_map(|held| held.iter()));
        for (resource, perms) in resources {
            if resource.trim().is_empty() {
                return Some("blank resource name".to_string());
            }
            if perms.iter().any(|perm| perm.trim().is_empty()) {
                return Some(format!("blank permission name on `{}`", resource));
            }
        }

        self.grants
            .keys()
            .any(|role| role.trim().is_empty())
            .then(|| "blank role name in grants".to_string())
    }

    /// Load this policy into `acl` through its public operations.
    ///
    /// Roles and structure are merged first, then the grants table as a
    /// whole. Grants register nothing: a role or resource only appears in
    /// the registry or structure if the policy lists it there.
    pub fn apply(&self, acl: &mut Acl) {
        acl.add_role(self.roles.as_slice())
            .add(&self.structure)
            .grant_all(&self.grants);
        info!(
            roles = acl.list_roles().len(),
            resources = acl.list().len(),
            "Applied ACL policy"
        );
    }

    /// Build a fresh engine from this policy.
    pub fn into_acl(self) -> Acl {
        let mut acl = Acl::new();
        self.apply(&mut acl);
        acl
    }
}
