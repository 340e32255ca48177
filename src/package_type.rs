use core::fmt;

/// The closed set of archive formats a package target can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageType {
    #[default]
    Tar,
    TarGz,
    Tgz,
    TarBz2,
    Tbz,
}

impl PackageType {
    /// All recognized names, sorted, for error messages.
    pub const NAMES: [&'static str; 5] = ["tar", "tar.bz2", "tar.gz", "tbz", "tgz"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tar" => Some(PackageType::Tar),
            "tar.gz" => Some(PackageType::TarGz),
            "tgz" => Some(PackageType::Tgz),
            "tar.bz2" => Some(PackageType::TarBz2),
            "tbz" => Some(PackageType::Tbz),
            _ => None,
        }
    }

    /// The archive filename suffix, which doubles as the engine's
    /// compression/format selector.
    pub fn suffix(self) -> &'static str {
        match self {
            PackageType::Tar => "tar",
            PackageType::TarGz => "tar.gz",
            PackageType::Tgz => "tgz",
            PackageType::TarBz2 => "tar.bz2",
            PackageType::Tbz => "tbz",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(PackageType::from_name("tar"), Some(PackageType::Tar));
        assert_eq!(PackageType::from_name("tgz"), Some(PackageType::Tgz));
        assert_eq!(PackageType::from_name("tar.bz2"), Some(PackageType::TarBz2));
        assert_eq!(PackageType::from_name("zip"), None);
        assert_eq!(PackageType::from_name(""), None);
    }

    #[test]
    fn test_suffix_round_trip() {
        for name in PackageType::NAMES {
            assert_eq!(PackageType::from_name(name).unwrap().suffix(), name);
        }
    }
}
