use std::cmp::Ordering;
use std::fmt;

/// A parsed `major[.minor][.patch][-metadata]` version.
///
/// Ordering is structural: major, minor, patch, then metadata. An untagged
/// release sorts above any tagged build of the same numbers; tags compare
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub metadata: Option<String>,
}

impl SemanticVersion {
    fn parse(input: &str) -> Option<Self> {
        let (core, metadata) = match input.split_once('-') {
            Some((core, metadata)) => (core, Some(metadata.to_string())),
            None => (input, None),
        };

        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(part) => part.parse().ok()?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(part) => part.parse().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            major,
            minor,
            patch,
            metadata,
        })
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.metadata, &other.metadata) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(metadata) = &self.metadata {
            write!(f, "-{metadata}")?;
        }
        Ok(())
    }
}

/// Sort key for arbitrary version strings.
///
/// Strings in the `major.minor.patch-metadata` shape compare structurally;
/// everything else compares lexicographically. Strings with more than two
/// dots are never parsed. Mixed comparisons (one side parsed, one not) fall
/// back to strings, where the parsed side contributes its normalized
/// rendering rather than its raw text. That asymmetry is inherited behavior
/// and kept as-is; it still yields a total order and never fails.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    parsed: Option<SemanticVersion>,
    raw: String,
}

impl VersionInfo {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let dots = raw.chars().filter(|ch| *ch == '.').count();
        let parsed = if dots > 2 {
            None
        } else {
            SemanticVersion::parse(raw)
        };

        Self {
            parsed,
            raw: raw.to_string(),
        }
    }

    #[must_use]
    pub fn parsed(&self) -> Option<&SemanticVersion> {
        self.parsed.as_ref()
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parsed {
            Some(version) => version.fmt(f),
            None => f.write_str(&self.raw),
        }
    }
}

impl Ord for VersionInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl PartialOrd for VersionInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionInfo {}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{SemanticVersion, VersionInfo};

    #[test]
    fn parses_full_semantic_versions() {
        let info = VersionInfo::parse("21.0.1-tem");
        let parsed = info.parsed().expect("three-component version should parse");
        assert_eq!(parsed.major, 21);
        assert_eq!(parsed.minor, 0);
        assert_eq!(parsed.patch, 1);
        assert_eq!(parsed.metadata.as_deref(), Some("tem"));
    }

    #[test]
    fn short_versions_default_missing_components_to_zero() {
        let parsed = VersionInfo::parse("17").parsed().cloned();
        assert_eq!(
            parsed,
            Some(SemanticVersion {
                major: 17,
                minor: 0,
                patch: 0,
                metadata: None,
            })
        );
        assert!(VersionInfo::parse("3.2").parsed().is_some());
    }

    #[test]
    fn more_than_two_dots_is_never_parsed() {
        let info = VersionInfo::parse("1.4.2.3");
        assert!(info.parsed().is_none());
        assert_eq!(info.raw(), "1.4.2.3");
    }

    #[test]
    fn unparseable_components_fall_back_to_raw() {
        assert!(VersionInfo::parse("1.8.0_392").parsed().is_none());
        assert!(VersionInfo::parse("m39c").parsed().is_none());
        assert!(VersionInfo::parse("").parsed().is_none());
    }

    #[test]
    fn structural_ordering_when_both_sides_parse() {
        let newer = VersionInfo::parse("21.0.2-tem");
        let older = VersionInfo::parse("21.0.1-tem");
        assert!(newer > older);
        assert!(VersionInfo::parse("17.0.9-amzn") < VersionInfo::parse("21.0.1-tem"));
        // numeric, not lexicographic: 10 > 9
        assert!(VersionInfo::parse("21.0.10-tem") > VersionInfo::parse("21.0.9-tem"));
    }

    #[test]
    fn untagged_release_sorts_above_tagged() {
        assert!(VersionInfo::parse("21.0.1") > VersionInfo::parse("21.0.1-tem"));
        assert!(VersionInfo::parse("21.0.1-amzn") < VersionInfo::parse("21.0.1-tem"));
    }

    #[test]
    fn unparsed_sides_compare_lexicographically() {
        let a = VersionInfo::parse("1.4.2.1");
        let b = VersionInfo::parse("1.4.2.10");
        let c = VersionInfo::parse("1.4.2.2");
        assert!(a < b);
        // lexicographic, so "10" lands before "2"
        assert!(b < c);
    }

    #[test]
    fn mixed_comparison_uses_the_normalized_rendering() {
        // "17" normalizes to "17.0.0" before the string comparison with the
        // unparsed side.
        let parsed = VersionInfo::parse("17");
        let unparsed = VersionInfo::parse("17.0.0.1");
        assert_eq!(parsed.to_string(), "17.0.0");
        assert!(parsed < unparsed);
    }

    #[test]
    fn ordering_is_transitive_over_mixed_inputs() {
        let inputs = [
            "21.0.1-tem",
            "21.0.2-tem",
            "8.0.392-amzn",
            "1.4.2.3",
            "1.4.2.10",
            "m39c",
        ];
        let parsed: Vec<VersionInfo> = inputs.iter().map(|raw| VersionInfo::parse(raw)).collect();

        for a in &parsed {
            for b in &parsed {
                for c in &parsed {
                    if a.cmp(b) != Ordering::Greater && b.cmp(c) != Ordering::Greater {
                        assert_ne!(
                            a.cmp(c),
                            Ordering::Greater,
                            "transitivity violated for {:?} {:?} {:?}",
                            a.raw(),
                            b.raw(),
                            c.raw()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_never_panics_on_odd_inputs() {
        let mut infos: Vec<VersionInfo> = ["1.2.3.4.5", "", "-", "a.b.c", "5", "5.0.0-x"]
            .iter()
            .map(|raw| VersionInfo::parse(raw))
            .collect();
        infos.sort();
        assert_eq!(infos.len(), 6);
    }
}
