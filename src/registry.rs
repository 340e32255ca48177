use crate::path::Path;
use crate::rules::Variable;
use crate::target::PackageTarget;

/// The engine's target-key unification rule: resolves relative target
/// references (`:name`, `sub/dir:name`, `//dir:name`) to canonical keys.
pub trait KeyUnifier {
    fn unify_key(&self, package_dir: &Path, raw: &str) -> String;
}

/// Handle onto another configured target, as exposed by the finalized
/// registry snapshot.
pub trait TargetOutputs {
    /// The build-engine variable for one of this target's output artifacts.
    /// An empty `kind` selects the primary output. `None` means the target
    /// produces no output of that kind.
    fn output_variable(&self, kind: &str) -> Option<Variable>;
}

/// Read-only view of the full target graph. Only available once the
/// configuration phase has completed for every target, which is what makes
/// deferred location-reference resolution sound.
pub trait RegistrySnapshot {
    fn lookup(&self, key: &str) -> Option<&dyn TargetOutputs>;
}

/// Registration side of the engine's registry, consumed by the
/// [`package`](crate::package) entry point during the configuration phase.
pub trait TargetRegistry {
    fn register(&mut self, target: PackageTarget);
}
