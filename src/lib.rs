mod error;
pub mod os;
mod package_type;
pub mod path;
pub mod registry;
pub mod rules;
mod source;
mod target;

pub use error::{ConfigError, EmitError};
pub use package_type::PackageType;
pub use path::Path;
pub use rules::{RuleGraph, StagingInput, Variable};
pub use source::{LocationRef, SourceSpec};
pub use target::{ConfigContext, LocationEntry, PackageDecl, PackageTarget, SourceEntry};

use crate::registry::TargetRegistry;

/// Declaration-style entry point: configures one package target and hands it
/// to the engine's registry. Deferred location references are resolved later,
/// when the engine invokes [`PackageTarget::emit_rules`] over the finalized
/// registry snapshot.
pub fn package(
    decl: PackageDecl,
    ctx: &ConfigContext<'_>,
    registry: &mut dyn TargetRegistry,
) -> Result<(), ConfigError> {
    let target = PackageTarget::configure(decl, ctx)?;
    registry.register(target);
    Ok(())
}
