//! Specification version canonicalization.

use crate::builder::error::BuildError;

/// The newest specification version this builder understands.
///
/// Independent of the crate's package version: the schema evolves on its
/// own cadence.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Pack a `major.minor.patch` string into a single comparable number.
///
/// Canonical form is `major * 2^16 + minor * 2^8 + patch`. Anything other
/// than exactly three dot-separated non-negative integers is rejected.
pub(crate) fn pack(version: &str) -> Result<u64, BuildError> {
    let malformed = || BuildError::MalformedVersion(version.to_string());

    let parts: Vec<&str> = version.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(malformed());
    };

    let major: u64 = major.parse().map_err(|_| malformed())?;
    let minor: u64 = minor.parse().map_err(|_| malformed())?;
    let patch: u64 = patch.parse().map_err(|_| malformed())?;

    // Components large enough to overflow the packed form cannot name a
    // real schema version; treat them as malformed rather than wrapping.
    major
        .checked_mul(1 << 16)
        .and_then(|high| minor.checked_mul(1 << 8).and_then(|mid| high.checked_add(mid)))
        .and_then(|value| value.checked_add(patch))
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_the_canonical_form() {
        assert_eq!(pack("0.0.0").unwrap(), 0);
        assert_eq!(pack("1.0.0").unwrap(), 1 << 16);
        assert_eq!(pack("1.2.3").unwrap(), (1 << 16) + (2 << 8) + 3);
        assert_eq!(pack("99.0.0").unwrap(), 99 << 16);
    }

    #[test]
    fn ordering_follows_semver_components() {
        assert!(pack("1.0.0").unwrap() > pack("0.255.255").unwrap());
        assert!(pack("0.2.0").unwrap() > pack("0.1.99").unwrap());
        assert!(pack("0.0.2").unwrap() > pack("0.0.1").unwrap());
    }

    #[test]
    fn rejects_components_that_overflow_the_packed_form() {
        // Three well-formed integers whose packed value exceeds u64.
        let huge = u64::MAX.to_string();
        for bad in [
            format!("{huge}.0.0"),
            "281474976710656.0.0".to_string(),
            format!("0.{huge}.0"),
            format!("0.0.{huge}"),
        ] {
            assert!(
                matches!(pack(&bad), Err(BuildError::MalformedVersion(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "1", "1.2", "1.2.3.4", "a.b.c", "1..3", "1.2.x", "-1.0.0"] {
            assert!(
                matches!(pack(bad), Err(BuildError::MalformedVersion(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
