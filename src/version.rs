// Canonical MAJOR.MINOR.PATCH versions and the two normalizers that produce them

use std::fmt;

/// A version in `MAJOR.MINOR.PATCH` form, with no `v` prefix and no build
/// segment. Only constructed through [`CanonicalVersion::from_product_version`]
/// and [`CanonicalVersion::from_tag`].
///
/// Equality is plain string equality: `1.2.0` and `1.2` are different, and a
/// local build ahead of the published tag still compares as "different".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalVersion(String);

impl CanonicalVersion {
    /// Normalize a 4-part product version (`A.B.C.D`) from a binary's version
    /// resource by dropping the build segment.
    pub fn from_product_version(raw: &str) -> Self {
        Self(strip_build_segment(raw).to_string())
    }

    /// Normalize a release tag (`v1.2.3`) from the release feed.
    pub fn from_tag(tag: &str) -> Self {
        Self(strip_tag_prefix(tag).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Drop a trailing build segment: `1.2.3.45` -> `1.2.3`.
/// Only a fourth (or later) component counts as a build segment, so versions
/// with three or fewer components are returned unchanged: `1.2.3` stays `1.2.3`.
pub fn strip_build_segment(raw: &str) -> &str {
    if raw.matches('.').count() < 3 {
        return raw;
    }
    match raw.rsplit_once('.') {
        Some((head, _build)) => head,
        None => raw,
    }
}

/// Strip a single leading `v`: `v1.2.3` -> `1.2.3`.
pub fn strip_tag_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
