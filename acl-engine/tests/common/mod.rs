//! Shared fixtures for integration tests.

#![allow(dead_code)]

use acl_engine::{Acl, Grants, RoleGrants, Selector};

/// Build a resource → permissions mapping from literals.
pub fn role_grants(entries: &[(&str, &[&str])]) -> RoleGrants {
    entries
        .iter()
        .map(|(resource, perms)| (resource.to_string(), perms.iter().copied().collect()))
        .collect()
}

/// Build a role → resource → permissions table from literals.
pub fn grants(entries: &[(&str, &[(&str, &[&str])])]) -> Grants {
    entries
        .iter()
        .map(|(role, held)| (role.to_string(), role_grants(held)))
        .collect()
}

/// An ACL exercising every grant call shape.
pub fn granted_acl() -> Acl {
    let mut acl = Acl::new();

    acl.grant(Selector::permissions(["guest", "anonymous"], "/page", ["read"]));
    acl.grant(Selector::permissions("demo", ["/article", "/blog"], "vote"));
    acl.grant(Selector::permissions("user", ["/profile", "/article"], ["create", "edit"]));
    acl.grant(Selector::grants(
        ["user", "admin"],
        role_grants(&[
            ("/page", &["create", "read", "edit", "delete"]),
            ("/profile", &["create", "delete"]),
        ]),
    ));
    acl.grant(Selector::grants(
        "admin",
        role_grants(&[("/admin", &["open", "manage"])]),
    ));
    // Duplicates, but exercises the full-table shape
    acl.grant_all(&grants(&[
        ("admin", &[("/admin", &["open", "manage"])]),
        ("user", &[("/page", &["create", "read"])]),
    ]));

    acl
}

/// A small ACL for which / which_any / show.
pub fn show_acl() -> Acl {
    let mut acl = Acl::new();
    acl.grant(Selector::permissions("user", "/page", ["read"]))
        .grant(Selector::permissions("author", "/page", ["read", "create"]))
        .grant(Selector::permissions("author", "/blog", ["read"]))
        .grant(Selector::permissions("admin", "/page", ["delete", "edit"]))
        .grant(Selector::permissions("admin", "/blog", ["read", "post"]));
    acl
}
