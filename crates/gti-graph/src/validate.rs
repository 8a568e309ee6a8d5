//! Relationship-name validation against a caller-supplied allow-list.

use crate::error::{GraphError, Result};

/// Check `relationship` against `allowed` (case-sensitive, exact match).
///
/// On failure the error carries `allowed` verbatim, in the order given, so the
/// caller can pick a valid name.
pub fn validate<S: AsRef<str>>(relationship: &str, allowed: &[S]) -> Result<()> {
    if allowed.iter().any(|name| name.as_ref() == relationship) {
        return Ok(());
    }

    tracing::debug!(relationship, "Rejected unknown relationship");
    Err(GraphError::UnknownRelationship {
        relationship: relationship.to_string(),
        allowed: allowed.iter().map(|s| s.as_ref().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["contacted_domains", "contacted_ips", "comments"];

    #[test]
    fn test_member_accepted() {
        for name in ALLOWED {
            assert!(validate(name, ALLOWED).is_ok());
        }
    }

    #[test]
    fn test_rejection_echoes_allow_list() {
        match validate("not_a_real_relationship", ALLOWED) {
            Err(GraphError::UnknownRelationship {
                relationship,
                allowed,
            }) => {
                assert_eq!(relationship, "not_a_real_relationship");
                assert_eq!(allowed, ALLOWED);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_no_case_folding_or_prefixes() {
        assert!(validate("Contacted_Domains", ALLOWED).is_err());
        assert!(validate("contacted", ALLOWED).is_err());
        assert!(validate("contacted_domains ", ALLOWED).is_err());
        assert!(validate("", ALLOWED).is_err());
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let empty: &[&str] = &[];
        assert!(validate("comments", empty).is_err());
    }
}
