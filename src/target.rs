use hashbrown::HashMap;
use tracing::warn;

use crate::error::{ConfigError, EmitError};
use crate::os::{FileKind, Os};
use crate::package_type::PackageType;
use crate::path::Path;
use crate::registry::{KeyUnifier, RegistrySnapshot};
use crate::rules::{RuleGraph, StagingInput, Variable};
use crate::source::{LocationRef, SourceSpec};

/// The declarative payload of a `package(...)` statement.
#[derive(Debug, Clone)]
pub struct PackageDecl {
    name: String,
    srcs: Vec<SourceSpec>,
    deps: Vec<String>,
    package_type: String,
    options: HashMap<String, String>,
}

impl PackageDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            srcs: Vec::new(),
            deps: Vec::new(),
            package_type: "tar".into(),
            options: HashMap::new(),
        }
    }

    /// Adds a source: a filesystem path, a `(path, destination)` pair, or a
    /// location reference such as `dir:name(kind)`.
    pub fn src(mut self, spec: impl Into<SourceSpec>) -> Self {
        self.srcs.push(spec.into());
        self
    }

    pub fn dep(mut self, key: impl Into<String>) -> Self {
        self.deps.push(key.into());
        self
    }

    pub fn package_type(mut self, name: impl Into<String>) -> Self {
        self.package_type = name.into();
        self
    }

    /// Pass-through option handed to the surrounding engine unchanged.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Everything the configuration phase needs from the surrounding engine.
pub struct ConfigContext<'a> {
    pub os: &'a dyn Os,
    pub unifier: &'a dyn KeyUnifier,
    /// Directory of the declaring package, workspace-relative.
    pub package_dir: Path,
    /// Root of the engine's build output tree.
    pub build_dir: Path,
}

/// A resolved filesystem source: workspace path plus archive-relative
/// destination. The destination is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: Path,
    pub dest: Path,
}

/// A deferred reference to another target's output. Unresolvable until the
/// whole graph is configured; `dest` is empty when the output is fed to the
/// archive directly instead of being staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub key: String,
    pub kind: String,
    pub dest: Path,
}

/// A target that packages a set of files, directory trees and other targets'
/// outputs into one archive.
///
/// Built in two phases: [`configure`](Self::configure) eagerly classifies and
/// resolves every source against the local filesystem, while
/// [`emit_rules`](Self::emit_rules) runs once the engine has a finalized
/// registry snapshot and declares the staging and archive rules.
#[derive(Debug)]
pub struct PackageTarget {
    name: String,
    fullname: String,
    package_type: PackageType,
    output_base: Path,
    sources: Vec<SourceEntry>,
    locations: Vec<LocationEntry>,
    deps: Vec<String>,
    expanded_deps: Vec<String>,
    options: HashMap<String, String>,
}

impl PackageTarget {
    /// Configuration phase: parses and validates the declaration, resolving
    /// filesystem sources immediately and recording location references as
    /// deferred tokens. `sources` and `locations` are immutable afterwards.
    pub fn configure(decl: PackageDecl, ctx: &ConfigContext<'_>) -> Result<Self, ConfigError> {
        let fullname = format!("{}:{}", ctx.package_dir, decl.name);

        let package_type = PackageType::from_name(&decl.package_type).ok_or_else(|| {
            ConfigError::InvalidPackageType {
                target: fullname.clone(),
                found: decl.package_type.clone(),
                expected: PackageType::NAMES.join(", "),
            }
        })?;

        let output_base = ctx
            .build_dir
            .join(ctx.package_dir.as_str())
            .join(&decl.name);

        let mut target = Self {
            name: decl.name,
            fullname,
            package_type,
            output_base,
            sources: Vec::new(),
            locations: Vec::new(),
            deps: Vec::new(),
            expanded_deps: Vec::new(),
            options: decl.options,
        };

        for dep in &decl.deps {
            let key = ctx.unifier.unify_key(&ctx.package_dir, dep);
            target.insert_dep(key);
        }

        for spec in &decl.srcs {
            let (src, dst) = spec.parts();
            if Path::from(src).has_parent_segment() || Path::from(dst).has_parent_segment() {
                return Err(ConfigError::ParentTraversal {
                    target: target.fullname.clone(),
                    src: src.into(),
                    dst: dst.into(),
                });
            }
            match LocationRef::parse(src) {
                Some(loc) => target.add_location(loc, dst, ctx),
                None => target.add_source(src, dst, ctx)?,
            }
        }

        Ok(target)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    pub fn output_base(&self) -> &Path {
        &self.output_base
    }

    pub fn sources(&self) -> &[SourceEntry] {
        &self.sources
    }

    pub fn locations(&self) -> &[LocationEntry] {
        &self.locations
    }

    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn expanded_deps(&self) -> &[String] {
        &self.expanded_deps
    }

    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// The surrounding engine may still extend the dependency set after
    /// configuration, e.g. with implicit toolchain targets. `key` must
    /// already be canonical.
    pub fn add_dep(&mut self, key: impl Into<String>) {
        self.insert_dep(key.into());
    }

    fn insert_dep(&mut self, key: String) {
        if !self.expanded_deps.contains(&key) {
            self.expanded_deps.push(key.clone());
        }
        if !self.deps.contains(&key) {
            self.deps.push(key);
        }
    }

    fn add_location(&mut self, loc: LocationRef, dst: &str, ctx: &ConfigContext<'_>) {
        let key = ctx.unifier.unify_key(&ctx.package_dir, &loc.key);
        self.locations.push(LocationEntry {
            key: key.clone(),
            kind: loc.kind,
            dest: Path::from(dst),
        });
        self.insert_dep(key);
    }

    /// Resolves a filesystem source and expands directories. Traversal
    /// segments were already rejected by the caller.
    fn add_source(&mut self, src: &str, dst: &str, ctx: &ConfigContext<'_>) -> Result<(), ConfigError> {
        let (path, stripped) = match src.strip_prefix("//") {
            Some(rest) => (Path::from(rest), rest),
            None => (ctx.package_dir.join(src), src),
        };
        let dest = if dst.is_empty() {
            Path::from(stripped)
        } else {
            Path::from(dst)
        };

        if self.fs_query(ctx.os.is_file(&path), &path)? {
            self.sources.push(SourceEntry { path, dest });
        } else if self.fs_query(ctx.os.is_dir(&path), &path)? {
            let mut expanded = Vec::new();
            self.walk_dir(ctx.os, &path, &dest, &mut expanded)?;
            // The walk order is filesystem-dependent; sort each expansion by
            // archive-relative destination so rule emission is deterministic
            // across platforms and runs.
            expanded.sort_by(|a, b| a.dest.cmp(&b.dest));
            self.sources.extend(expanded);
        } else {
            warn!(
                package = %self.fullname,
                path = %path,
                "package source is neither a file nor a directory; ignored"
            );
        }
        Ok(())
    }

    /// One entry per regular file in the subtree, destination preserving the
    /// path relative to the directory root. Non-regular entries are skipped.
    fn walk_dir(
        &self,
        os: &dyn Os,
        dir: &Path,
        dest: &Path,
        out: &mut Vec<SourceEntry>,
    ) -> Result<(), ConfigError> {
        let entries = self.fs_query(os.read_dir(dir), dir)?;
        for entry in entries {
            let path = dir.join(&entry.name);
            let dest = dest.join(&entry.name);
            match entry.kind {
                FileKind::File => out.push(SourceEntry { path, dest }),
                FileKind::Dir => self.walk_dir(os, &path, &dest, out)?,
                FileKind::Other => {}
            }
        }
        Ok(())
    }

    fn fs_query<T>(&self, result: crate::os::Result<T>, path: &Path) -> Result<T, ConfigError> {
        result.map_err(|source| ConfigError::Walk {
            target: self.fullname.clone(),
            path: path.to_string(),
            source,
        })
    }

    /// Rule-emission phase, invoked once by the engine after every target has
    /// been configured. Declares one staging rule per resolved source, stages
    /// location references that carry a destination, and emits the single
    /// archive rule over all inputs in stable order. Returns the archive
    /// rule's variable.
    pub fn emit_rules(
        &self,
        registry: &dyn RegistrySnapshot,
        rules: &mut dyn RuleGraph,
    ) -> Result<Variable, EmitError> {
        let sources_dir = Path::from(format!("{}.sources", self.output_base));
        let mut inputs = Vec::new();
        let mut layout = Vec::new();

        for (i, entry) in self.sources.iter().enumerate() {
            let dest = sources_dir.join(&entry.dest);
            let var = rules.declare_staging_rule(
                &self.var_name(&format!("source__{i}")),
                &dest,
                StagingInput::File(&entry.path),
            );
            inputs.push(var);
            layout.push(dest);
        }

        for (i, loc) in self.locations.iter().enumerate() {
            let Some(handle) = registry.lookup(&loc.key) else {
                return Err(EmitError::UnknownTarget {
                    target: self.fullname.clone(),
                    key: loc.key.clone(),
                });
            };
            let Some(output) = handle.output_variable(&loc.kind) else {
                warn!(
                    package = %self.fullname,
                    key = %loc.key,
                    kind = %loc.kind,
                    "location reference has no such output; ignored"
                );
                continue;
            };
            if loc.dest.is_empty() {
                inputs.push(output);
            } else {
                let dest = sources_dir.join(&loc.dest);
                let var = rules.declare_staging_rule(
                    &self.var_name(&format!("location__{i}")),
                    &dest,
                    StagingInput::Output(&output),
                );
                inputs.push(var);
                layout.push(dest);
            }
        }

        let output = Path::from(format!("{}.{}", self.output_base, self.package_type.suffix()));
        let rule = rules.declare_archive_rule(&self.var_name("package"), &output, &inputs);
        rules.set_output_format(&rule, self.package_type.suffix());

        // The staged destinations define the archive layout; make it part of
        // the rule's identity so renaming a destination rebuilds the archive
        // even when file contents are unchanged.
        if !layout.is_empty() {
            rules.declare_value_dependency(&rule, &layout);
        }

        Ok(rule)
    }

    fn var_name(&self, suffix: &str) -> String {
        let mangled: String = self
            .fullname
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{mangled}__{suffix}")
    }
}
