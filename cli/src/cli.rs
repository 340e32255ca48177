use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use picopack::LocationRef;

#[derive(Parser, Debug)]
#[command(name = "picopack")]
#[command(about = "Dry-run a package target declaration against a workspace")]
#[command(version)]
pub struct Args {
    /// Target name
    #[arg(long, default_value = "package")]
    pub name: String,

    /// Archive format
    #[arg(long = "type", value_name = "type", default_value = "tar")]
    pub package_type: String,

    /// Source: a path, `path=dest`, or a location reference such as
    /// `dir:name(kind)` (can be used multiple times)
    #[arg(short = 's', long = "src", value_name = "src[=dest]")]
    pub srcs: Vec<Src>,

    /// Explicit dependency on another target (can be used multiple times)
    #[arg(long = "dep", value_name = "target-key")]
    pub deps: Vec<String>,

    /// Known target output, as `dir:name[(kind)]=variable`; stands in for
    /// the rest of the build graph (can be used multiple times)
    #[arg(long = "provide", value_name = "label=variable")]
    pub provides: Vec<Provide>,

    /// Directory of the declaring package, workspace-relative
    #[arg(long, value_name = "dir", default_value = "")]
    pub package_dir: String,

    /// Root of the build output tree
    #[arg(long, value_name = "dir", default_value = "build")]
    pub build_dir: String,

    /// Workspace root on the local filesystem
    #[arg(default_value = ".")]
    pub workspace: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Src {
    pub src: String,
    pub dest: Option<String>,
}

impl FromStr for Src {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once('=') {
            Some((src, dest)) => Src {
                src: src.to_string(),
                dest: Some(dest.to_string()),
            },
            None => Src {
                src: s.to_string(),
                dest: None,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct Provide {
    pub key: String,
    pub kind: String,
    pub variable: String,
}

impl FromStr for Provide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, variable) = s.split_once('=').context("No variable specified")?;
        let loc = LocationRef::parse(label)
            .with_context(|| format!("Not a target label: {label}"))?;
        Ok(Provide {
            key: loc.key,
            kind: loc.kind,
            variable: variable.to_string(),
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}
