/// A raw source specification as written in a package declaration: either a
/// bare path, or a path together with its destination inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Path(String),
    PathWithDestination(String, String),
}

impl SourceSpec {
    /// The `(source, destination)` halves; the destination is empty when the
    /// declaration did not supply one.
    pub fn parts(&self) -> (&str, &str) {
        match self {
            SourceSpec::Path(src) => (src, ""),
            SourceSpec::PathWithDestination(src, dst) => (src, dst),
        }
    }
}

impl From<&str> for SourceSpec {
    fn from(src: &str) -> Self {
        SourceSpec::Path(src.into())
    }
}

impl From<String> for SourceSpec {
    fn from(src: String) -> Self {
        SourceSpec::Path(src)
    }
}

impl<S: Into<String>, D: Into<String>> From<(S, D)> for SourceSpec {
    fn from((src, dst): (S, D)) -> Self {
        SourceSpec::PathWithDestination(src.into(), dst.into())
    }
}

/// A parsed reference to another target's output artifact.
///
/// The textual form is a target label `dir:name`, optionally followed by a
/// parenthesized output kind: `dir:name(kind)`. An empty kind selects the
/// referenced target's primary output. Anything that does not match is a
/// filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRef {
    pub key: String,
    pub kind: String,
}

impl LocationRef {
    pub fn parse(spec: &str) -> Option<Self> {
        let (label, kind) = match spec.find('(') {
            Some(open) => {
                if !spec.ends_with(')') || spec.len() - 1 <= open {
                    return None;
                }
                (&spec[..open], &spec[open + 1..spec.len() - 1])
            }
            None => (spec, ""),
        };

        // A target label always carries exactly one `dir:name` separator;
        // plain filesystem paths never do.
        let colon = label.find(':')?;
        let name = &label[colon + 1..];
        if name.is_empty() || name.contains(':') || kind.contains(')') {
            return None;
        }

        Some(LocationRef {
            key: label.into(),
            kind: kind.trim().into(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_label() {
        let loc = LocationRef::parse("pkg/sub:other").unwrap();
        assert_eq!(loc.key, "pkg/sub:other");
        assert_eq!(loc.kind, "");
    }

    #[test]
    fn test_parse_label_with_kind() {
        let loc = LocationRef::parse("pkg:other(header)").unwrap();
        assert_eq!(loc.key, "pkg:other");
        assert_eq!(loc.kind, "header");

        let loc = LocationRef::parse("pkg:other( header )").unwrap();
        assert_eq!(loc.kind, "header");
    }

    #[test]
    fn test_parse_relative_label() {
        let loc = LocationRef::parse(":other").unwrap();
        assert_eq!(loc.key, ":other");
    }

    #[test]
    fn test_parse_rejects_paths() {
        assert_eq!(LocationRef::parse("a.txt"), None);
        assert_eq!(LocationRef::parse("dir/file.txt"), None);
        assert_eq!(LocationRef::parse("notes(1).txt"), None);
        assert_eq!(LocationRef::parse("pkg:"), None);
    }

    #[test]
    fn test_spec_parts() {
        assert_eq!(SourceSpec::from("a.txt").parts(), ("a.txt", ""));
        assert_eq!(
            SourceSpec::from(("a.txt", "docs/a.txt")).parts(),
            ("a.txt", "docs/a.txt")
        );
    }
}
