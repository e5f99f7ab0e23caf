//! Permission roles and their copy-on-write collection.
//!
//! Roles form a small closed set, so they are a tagged enum rather than a
//! trait hierarchy; only the wire name varies per role. The collection is
//! persistent: every mutator borrows the receiver and returns a new
//! collection, so a set handed to another component can never change
//! underneath it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named permission level attached to a principal.
///
/// # Examples
/// ```
/// use blog_backend::domain::Role;
///
/// assert_eq!(Role::Admin.as_str(), "ROLE_ADMIN");
/// assert_eq!("ROLE_USER".parse::<Role>(), Ok(Role::User));
/// assert!("ROLE_SUPERUSER".parse::<Role>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Backend administrator.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    /// Regular authenticated user.
    #[serde(rename = "ROLE_USER")]
    User,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a string does not name a known role.
///
/// This is the runtime edge of the collection's type invariant: role values
/// themselves are statically checked, so only untrusted names (session
/// cookies, database rows) can fail, and they fail fast here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role name: {name}")]
pub struct RoleParseError {
    /// The rejected input.
    pub name: String,
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ROLE_ADMIN" => Ok(Self::Admin),
            "ROLE_USER" => Ok(Self::User),
            other => Err(RoleParseError {
                name: other.to_owned(),
            }),
        }
    }
}

/// Keyed, duplicate-rejecting, copy-on-write collection of roles.
///
/// Entries are keyed by string; [`RoleCollection::add`] keys a role by its
/// wire name, which makes duplicate adds a no-op, while
/// [`RoleCollection::set`] associates a role at an explicit key. Iteration
/// order follows key order and is deterministic.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Role, RoleCollection};
///
/// let roles = RoleCollection::empty().add(Role::User);
/// let widened = roles.add(Role::Admin);
///
/// // The receiver is never modified.
/// assert!(!roles.contains(Role::Admin));
/// assert!(widened.contains(Role::Admin));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCollection {
    entries: BTreeMap<String, Role>,
}

impl RoleCollection {
    /// The empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a collection from role values, deduplicating by wire name.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let entries = roles
            .into_iter()
            .map(|role| (role.as_str().to_owned(), role))
            .collect();
        Self { entries }
    }

    /// Parse untrusted role names into a collection.
    ///
    /// Any unknown name rejects the whole input; nothing is partially
    /// constructed.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, RoleParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = BTreeMap::new();
        for name in names {
            let role: Role = name.as_ref().parse()?;
            entries.insert(role.as_str().to_owned(), role);
        }
        Ok(Self { entries })
    }

    /// Return a collection that also holds `role`.
    ///
    /// Adding a role that is already present returns an equal collection;
    /// membership and length are unchanged.
    #[must_use = "the receiver is unchanged; use the returned collection"]
    pub fn add(&self, role: Role) -> Self {
        if self.contains(role) {
            return self.clone();
        }
        self.set(role.as_str(), role)
    }

    /// Return a collection with `role` associated at `key`.
    #[must_use = "the receiver is unchanged; use the returned collection"]
    pub fn set(&self, key: impl Into<String>, role: Role) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), role);
        Self { entries }
    }

    /// Membership test by value equality.
    pub fn contains(&self, role: Role) -> bool {
        self.entries.values().any(|held| *held == role)
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no roles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over held roles in key order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.entries.values().copied()
    }

    /// Wire names of the held roles, in key order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|role| role.as_str().to_owned()).collect()
    }
}

impl FromIterator<Role> for RoleCollection {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::from_roles(iter)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Admin, "ROLE_ADMIN")]
    #[case(Role::User, "ROLE_USER")]
    fn roles_round_trip_their_wire_names(#[case] role: Role, #[case] name: &str) {
        assert_eq!(role.as_str(), name);
        assert_eq!(name.parse::<Role>(), Ok(role));
        assert_eq!(role.to_string(), name);
    }

    #[rstest]
    fn adding_a_duplicate_leaves_membership_unchanged() {
        let once = RoleCollection::empty().add(Role::Admin);
        let twice = once.add(Role::Admin);

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
        assert!(twice.contains(Role::Admin));
    }

    #[rstest]
    fn mutators_leave_the_receiver_unchanged() {
        let original = RoleCollection::empty();
        let grown = original.add(Role::User);
        let keyed = original.set("primary", Role::Admin);

        assert!(original.is_empty());
        assert_eq!(grown.len(), 1);
        assert!(keyed.contains(Role::Admin));
    }

    #[rstest]
    fn set_associates_at_an_explicit_key() {
        let roles = RoleCollection::empty()
            .set("primary", Role::User)
            .set("primary", Role::Admin);

        // The key was overwritten, not duplicated.
        assert_eq!(roles.len(), 1);
        assert!(roles.contains(Role::Admin));
        assert!(!roles.contains(Role::User));
    }

    #[rstest]
    fn unknown_names_reject_the_whole_input() {
        let err = RoleCollection::try_from_names(["ROLE_ADMIN", "ROLE_WIZARD"])
            .expect_err("unknown names must fail");
        assert_eq!(err.name, "ROLE_WIZARD");
    }

    #[rstest]
    fn parsed_names_deduplicate() {
        let roles = RoleCollection::try_from_names(["ROLE_USER", "ROLE_USER", "ROLE_ADMIN"])
            .expect("valid names");
        assert_eq!(roles.len(), 2);
        assert_eq!(roles.names(), ["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[rstest]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::Admin).expect("serializes");
        assert_eq!(json, "\"ROLE_ADMIN\"");
        let back: Role = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, Role::Admin);
    }
}
