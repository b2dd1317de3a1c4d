//! Typed identifiers
//!
//! Every entity kind gets its own newtype so ids cannot be mixed up at
//! call sites. String ids follow the prefixed sequence scheme of the
//! persisted format (`APP-001`, `PRJ-001`, ...); domain ids are small
//! integers and capability ids are dotted paths scoped to their domain
//! (`3.2`, `3.2.1`).

use serde::{Deserialize, Serialize};

/// Numeric domain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(pub u32);

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dotted capability identifier, scoped to its owning domain
///
/// The first segment is the owning domain's numeric id, so `"3.2"` is
/// the second capability of domain 3 and `"3.2.1"` its first
/// sub-capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(pub String);

impl CapabilityId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Owning domain, parsed from the leading segment
    #[must_use]
    pub fn domain_id(&self) -> Option<DomainId> {
        let head = self.0.split('.').next()?;
        head.parse().ok().map(DomainId)
    }

    /// Whether this capability (or sub-capability) belongs to `domain`
    #[must_use]
    pub fn belongs_to(&self, domain: DomainId) -> bool {
        self.domain_id() == Some(domain)
    }
}

impl std::fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Application identifier (`APP-001`)
    AppId
);
string_id!(
    /// Vendor identifier (`VND-001`)
    VendorId
);
string_id!(
    /// Project identifier (`PRJ-001`)
    ProjectId
);
string_id!(
    /// End-to-end process identifier (`E2E-001`)
    ProcessId
);
string_id!(
    /// Demand identifier (`DEM-001`)
    DemandId
);
string_id!(
    /// Integration identifier (`INT-001`)
    IntegrationId
);

/// Next id in a prefixed sequence (`APP-001`, `APP-002`, ...)
///
/// Based on the maximum existing sequence number, never the collection
/// length, so deleted ids are never reissued. Ids that do not match the
/// `{prefix}-{number}` shape are ignored.
#[must_use]
pub fn next_prefixed_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-'))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}-{:03}", max + 1)
}

/// Next numeric domain id (max existing + 1)
#[must_use]
pub fn next_domain_id(existing: impl Iterator<Item = DomainId>) -> DomainId {
    DomainId(existing.map(|id| id.0).max().unwrap_or(0) + 1)
}

/// Next dotted child id under `parent` (`"3"` -> `"3.4"`, `"3.4"` -> `"3.4.2"`)
///
/// Scans the existing children's trailing segments for the maximum.
#[must_use]
pub fn next_dotted_id<'a>(parent: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(parent)?.strip_prefix('.'))
        .filter(|rest| !rest.contains('.'))
        .filter_map(|rest| rest.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{parent}.{}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_ids_are_monotonic_over_max() {
        let ids = ["APP-001", "APP-007", "APP-003"];
        let next = next_prefixed_id("APP", ids.iter().copied());
        assert_eq!(next, "APP-008");
    }

    #[test]
    fn prefixed_ids_ignore_foreign_shapes() {
        let ids = ["APP-002", "legacy-app", "PRJ-009"];
        assert_eq!(next_prefixed_id("APP", ids.iter().copied()), "APP-003");
        assert_eq!(next_prefixed_id("DEM", ids.iter().copied()), "DEM-001");
    }

    #[test]
    fn dotted_ids_scope_to_parent() {
        let ids = ["3.1", "3.2", "3.2.5", "4.9"];
        assert_eq!(next_dotted_id("3", ids.iter().copied()), "3.3");
        assert_eq!(next_dotted_id("3.2", ids.iter().copied()), "3.2.6");
        assert_eq!(next_dotted_id("5", ids.iter().copied()), "5.1");
    }

    #[test]
    fn capability_id_resolves_owning_domain() {
        let cap = CapabilityId::new("3.2.1");
        assert_eq!(cap.domain_id(), Some(DomainId(3)));
        assert!(cap.belongs_to(DomainId(3)));
        assert!(!cap.belongs_to(DomainId(2)));
    }
}
