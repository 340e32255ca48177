use core::fmt;

use crate::path::Path;

/// Opaque handle to a declared rule output in the engine's graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a staging rule copies into the archive layout.
#[derive(Debug, Clone, Copy)]
pub enum StagingInput<'a> {
    /// A resolved workspace file.
    File(&'a Path),
    /// Another rule's output.
    Output(&'a Variable),
}

/// Build rule graph abstraction for the external build engine.
///
/// This trait defines the interface through which a package target registers
/// its work with whichever engine backend is in use. Scheduling, staleness
/// checks and the actual copying/archiving are entirely the backend's
/// responsibility; the target only declares rules and their inputs.
pub trait RuleGraph: 'static {
    /// Declares a rule that materializes `src` at `dest` inside the target's
    /// staging directory. `name` is a deterministic variable name derived
    /// from the entry's position, so re-running emission yields the same
    /// graph and the engine's caching stays stable.
    fn declare_staging_rule(&mut self, name: &str, dest: &Path, src: StagingInput<'_>)
    -> Variable;

    /// Declares the single archive rule producing `output` from `inputs`,
    /// in the order given.
    fn declare_archive_rule(&mut self, name: &str, output: &Path, inputs: &[Variable])
    -> Variable;

    /// Configures the archive rule's compression/format suffix.
    fn set_output_format(&mut self, rule: &Variable, suffix: &str);

    /// Adds a value-based dependency on `values`, making the ordered archive
    /// layout part of the rule's identity: renaming a destination must
    /// invalidate the archive even when file contents are unchanged.
    fn declare_value_dependency(&mut self, rule: &Variable, values: &[Path]);
}
