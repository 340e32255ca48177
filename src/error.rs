use thiserror::Error;

/// Fatal configuration errors: the package declaration itself is invalid.
/// Every message carries the offending target's fullname and the exact
/// rejected value so that multi-target builds stay diagnosable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{target}: invalid package type '{found}'; supported types are {expected}")]
    InvalidPackageType {
        target: String,
        found: String,
        expected: String,
    },

    #[error("{target}: invalid src ({src}, {dst}); parent directory segments are not allowed")]
    ParentTraversal {
        target: String,
        src: String,
        dst: String,
    },

    #[error("{target}: failed to scan source directory {path}")]
    Walk {
        target: String,
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Graph-consistency errors raised during rule emission. These indicate a
/// bug in dependency tracking rather than a bad declaration: a location
/// reference was recorded at configuration time, so its key must be present
/// in the registry snapshot by the time rules are emitted.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("{target}: location reference '{key}' is not in the target registry")]
    UnknownTarget { target: String, key: String },
}
