//! Repository version references.
//!
//! A reference is the href of a repository version, e.g.
//! `/api/pulp/<domain>/api/v3/repositories/rpm/rpm/<uuid>/versions/<n>/`.
//! Only the `<uuid>/versions/<n>` tail is interpreted, so hrefs with or
//! without a domain prefix are accepted.

use rpmlens_db::VersionRef;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Fewest non-empty path segments a reference can have: `<uuid>/versions/<n>`.
pub const MIN_SEGMENTS: usize = 3;

const VERSIONS_SEGMENT: &str = "versions";

/// Parses one version reference.
///
/// The repository id is normalized to the lowercase hyphenated UUID form.
pub fn parse_reference(href: &str) -> CoreResult<VersionRef> {
    let segments = href
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();

    let &[.., id, marker, number] = segments.as_slice() else {
        return Err(CoreError::invalid_reference(
            href,
            format!("expected at least {MIN_SEGMENTS} path segments"),
        ));
    };

    if marker != VERSIONS_SEGMENT {
        return Err(CoreError::invalid_reference(
            href,
            format!("expected '{VERSIONS_SEGMENT}' before the version number, found '{marker}'"),
        ));
    }

    let id = Uuid::parse_str(id)
        .map_err(|_| CoreError::invalid_reference(href, format!("{id} is not a valid uuid")))?;

    let number = number
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| number.parse::<i64>().ok())
        .flatten()
        .ok_or_else(|| {
            CoreError::invalid_reference(
                href,
                format!("{number} is not a valid non-negative integer"),
            )
        })?;

    Ok(VersionRef::new(id.hyphenated().to_string(), number))
}

/// Parses every reference, preserving input order. The first malformed
/// reference aborts the whole batch.
pub fn parse_references<S: AsRef<str>>(hrefs: &[S]) -> CoreResult<Vec<VersionRef>> {
    hrefs.iter().map(|href| parse_reference(href.as_ref())).collect()
}

/// Builds the href of version `number` of the RPM repository `repository_id`
/// in `domain`.
pub fn version_href(domain: &str, repository_id: &str, number: i64) -> String {
    format!("/api/pulp/{domain}/api/v3/repositories/rpm/rpm/{repository_id}/versions/{number}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "018c1c95-4281-76eb-b277-842cbad524f4";

    #[test]
    fn test_parse_domain_href() {
        let href = format!("/pulp/e1c6bee3/api/v3/repositories/rpm/rpm/{REPO}/versions/1/");
        let parsed = parse_reference(&href).unwrap();

        assert_eq!(parsed.repository_id, REPO);
        assert_eq!(parsed.number, 1);
    }

    #[test]
    fn test_parse_without_trailing_slash_or_prefix() {
        let parsed = parse_reference(&format!("{REPO}/versions/12")).unwrap();
        assert_eq!(parsed, VersionRef::new(REPO, 12));
    }

    #[test]
    fn test_parse_normalizes_uuid() {
        let href = format!(
            "/api/v3/repositories/rpm/rpm/{}/versions/0/",
            REPO.to_uppercase()
        );
        assert_eq!(parse_reference(&href).unwrap().repository_id, REPO);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let href = version_href("default", REPO, 3);
        assert_eq!(parse_reference(&href).unwrap(), parse_reference(&href).unwrap());
    }

    #[test]
    fn test_rejects_bad_uuid() {
        let err = parse_reference("/api/v3/repositories/rpm/rpm/not-a-uuid/versions/1/").unwrap_err();
        match err {
            CoreError::InvalidReference { value, reason } => {
                assert!(value.contains("not-a-uuid"));
                assert!(reason.contains("not-a-uuid is not a valid uuid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_number() {
        for number in ["-1", "one", "+2", ""] {
            let href = format!("/x/{REPO}/versions/{number}/");
            assert!(
                matches!(parse_reference(&href), Err(CoreError::InvalidReference { .. })),
                "{href} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_short_or_misplaced_reference() {
        assert!(parse_reference("/versions/1/").is_err());
        assert!(parse_reference(&format!("/{REPO}/publications/1/")).is_err());
    }

    #[test]
    fn test_parse_references_preserves_order() {
        let other = "7f3e2d1c-0b9a-4877-8665-544332211000";
        let hrefs = [version_href("d", other, 2), version_href("d", REPO, 1)];
        let parsed = parse_references(&hrefs).unwrap();

        assert_eq!(parsed, vec![VersionRef::new(other, 2), VersionRef::new(REPO, 1)]);
    }

    #[test]
    fn test_parse_references_fails_whole_batch() {
        let hrefs = [version_href("d", REPO, 1), "/bad/versions/x/".to_string()];
        assert!(parse_references(&hrefs).is_err());
    }
}
