//! # ACL Engine
//!
//! An embedded role-based access-control engine. It keeps a registry of
//! roles, a vocabulary of resources and their permissions, and a table of
//! which permissions each role holds on each resource, and answers
//! authorization queries over them.
//!
//! ## Overview
//!
//! - **Structure**: resource → permissions vocabulary
//! - **Grants**: role → resource → permissions actually held
//! - **Selectors**: the call shapes used to grant, revoke and check
//! - **Set operations**: deep merge / deep diff, the only mutators of nested state
//!
//! ## Architecture
//!
//! ```text
//! caller ─→ Acl ─→ set_ops (deep_merge / deep_diff) ─→ roles / structure / grants
//! caller ─→ Acl::check / check_any / which / which_any / show  (read-only)
//! Policy ⇄ JSON  (seeding from configuration, persisting snapshots)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use acl_engine::{Acl, Selector};
//!
//! let mut acl = Acl::new();
//! acl.grant(Selector::permissions(["user", "admin"], "/page", ["read", "edit"]))
//!     .grant(Selector::permissions("admin", "/admin", ["open", "manage"]));
//!
//! // Conjunctive: every role needs every requirement
//! assert!(acl.check(Selector::resources(["user", "admin"], "/page")));
//! assert!(!acl.check(Selector::resources(["user", "admin"], "/admin")));
//!
//! // Disjunctive: any overlap is enough
//! assert!(acl.check_any(Selector::resources(["user", "admin"], "/admin")));
//!
//! // Intersection / union of what roles hold
//! assert_eq!(acl.which(["user", "admin"]).len(), 1);
//! assert_eq!(acl.which_any(["user", "admin"]).len(), 2);
//! ```
//!
//! ## Permissive semantics
//!
//! Operations on unknown roles, resources or permissions are no-ops or
//! contribute nothing. Only policy loading can fail (see [`AclError`]).
//!
//! ## Concurrency
//!
//! The engine is synchronous and holds no locks. Hosts that share one
//! instance between threads serialize access themselves, e.g. with a
//! `RwLock<Acl>`.

pub mod engine;
pub mod error;
pub mod permissions;
pub mod policy;
pub mod selector;
pub mod set_ops;

mod proptests;

// Re-export main types for convenience
pub use engine::Acl;
pub use error::{AclError, AclResult};
pub use permissions::{Grants, PermissionSet, RoleGrants, Structure};
pub use policy::Policy;
pub use selector::{Names, Selector};
