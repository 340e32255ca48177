use std::collections::HashMap;

mod cli;
mod os;
mod rules;

use picopack::path::Path;
use picopack::registry::{KeyUnifier, RegistrySnapshot, TargetOutputs};
use picopack::{ConfigContext, PackageDecl, PackageTarget, Variable};
use tracing_subscriber::EnvFilter;

/// Label unification for a flat workspace: `//dir:name` is already canonical,
/// `:name` is package-local, anything else is package-dir-relative.
struct Labels;

impl KeyUnifier for Labels {
    fn unify_key(&self, package_dir: &Path, raw: &str) -> String {
        if let Some(rest) = raw.strip_prefix("//") {
            rest.into()
        } else if raw.starts_with(':') || package_dir.is_empty() {
            format!("{package_dir}{raw}")
        } else {
            format!("{package_dir}/{raw}")
        }
    }
}

struct Outputs(HashMap<String, Variable>);

impl TargetOutputs for Outputs {
    fn output_variable(&self, kind: &str) -> Option<Variable> {
        self.0.get(kind).cloned()
    }
}

/// Registry snapshot built from `--provide` arguments.
#[derive(Default)]
struct Provided(HashMap<String, Outputs>);

impl RegistrySnapshot for Provided {
    fn lookup(&self, key: &str) -> Option<&dyn TargetOutputs> {
        self.0.get(key).map(|outputs| outputs as &dyn TargetOutputs)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = cli::parse();

    let mut decl =
        PackageDecl::new(args.name.as_str()).package_type(args.package_type.as_str());
    for src in &args.srcs {
        decl = match &src.dest {
            Some(dest) => decl.src((src.src.as_str(), dest.as_str())),
            None => decl.src(src.src.as_str()),
        };
    }
    for dep in &args.deps {
        decl = decl.dep(dep.as_str());
    }

    let os = os::OsEnv::new(&args.workspace);
    let ctx = ConfigContext {
        os: &os,
        unifier: &Labels,
        package_dir: Path::from(&args.package_dir),
        build_dir: Path::from(&args.build_dir),
    };
    let target = PackageTarget::configure(decl, &ctx)?;

    let mut registry = Provided::default();
    for provide in &args.provides {
        registry
            .0
            .entry(provide.key.clone())
            .or_insert_with(|| Outputs(HashMap::new()))
            .0
            .insert(provide.kind.clone(), Variable::new(provide.variable.as_str()));
    }

    target.emit_rules(&registry, &mut rules::Printer)?;

    Ok(())
}
