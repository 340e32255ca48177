use core::fmt;

/// A workspace-relative path with `/` separators. Backslashes are normalized
/// on construction so that archive layouts compare equal across platforms.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Path(String);

const SEP: &str = "/";

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.0)
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().replace("\\", "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, path: impl AsRef<str>) -> Self {
        if path.as_ref().starts_with(SEP) || self.0.is_empty() {
            return Self(path.as_ref().into());
        }

        let mut new_path = String::from(self.0.trim_end_matches(SEP));
        new_path.push_str(SEP);
        new_path.push_str(path.as_ref());
        Self(new_path)
    }

    /// True when any component of the path is a `..` segment.
    pub fn has_parent_segment(&self) -> bool {
        self.0.split(SEP).any(|component| component == "..")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(Path::from("a/b").join("c").as_str(), "a/b/c");
        assert_eq!(Path::from("a/b/").join("c").as_str(), "a/b/c");
        assert_eq!(Path::from("").join("c").as_str(), "c");
        assert_eq!(Path::from("a").join("/abs").as_str(), "/abs");
    }

    #[test]
    fn test_backslash_normalization() {
        assert_eq!(Path::from("a\\b\\c.txt").as_str(), "a/b/c.txt");
    }

    #[test]
    fn test_parent_segment() {
        assert!(Path::from("../a").has_parent_segment());
        assert!(Path::from("a/../b").has_parent_segment());
        assert!(Path::from("a/b/..").has_parent_segment());
        assert!(!Path::from("a/b..c").has_parent_segment());
        assert!(!Path::from("a/..b/c").has_parent_segment());
        assert!(!Path::from("").has_parent_segment());
    }
}
