use picopack::path::Path;
use picopack::rules::{RuleGraph, StagingInput, Variable};

/// Prints the declared rules instead of handing them to a real engine.
#[derive(Default)]
pub struct Printer;

impl RuleGraph for Printer {
    fn declare_staging_rule(&mut self, name: &str, dest: &Path, src: StagingInput<'_>) -> Variable {
        match src {
            StagingInput::File(path) => println!("{name} = stage {path} -> {dest}"),
            StagingInput::Output(var) => println!("{name} = stage ${var} -> {dest}"),
        }
        Variable::new(name)
    }

    fn declare_archive_rule(&mut self, name: &str, output: &Path, inputs: &[Variable]) -> Variable {
        let inputs = inputs
            .iter()
            .map(|v| format!("${v}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{name} = archive [{inputs}] -> {output}");
        Variable::new(name)
    }

    fn set_output_format(&mut self, rule: &Variable, suffix: &str) {
        println!("{rule}.format = {suffix}");
    }

    fn declare_value_dependency(&mut self, rule: &Variable, values: &[Path]) {
        let values = values
            .iter()
            .map(Path::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        println!("{rule}.layout = [{values}]");
    }
}
