use serde::Serialize;
use symck_core::responses::{AttributesResponse, ResolveResponse};
use symck_match::ScenarioReport;

use crate::cli::OutputFormat;

pub mod table;

/// A response that knows how to lay itself out as a table.
pub trait TableView {
    fn headers(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

/// Render a response in the requested format.
pub fn render<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let rows = value.rows();
            if rows.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            Ok(table::render_table(&value.headers(), &rows))
        }
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl TableView for ResolveResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["name", "kind", "assembly", "context"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let resolved = &self.resolved;
        vec![vec![
            resolved.name.clone(),
            format!("{:?}", resolved.kind).to_lowercase(),
            resolved.assembly.clone(),
            resolved.context.to_string(),
        ]]
    }
}

impl TableView for AttributesResponse {
    fn headers(&self) -> Vec<&'static str> {
        vec!["line", "class", "assembly", "arguments", "named"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.attributes
            .iter()
            .map(|attribute| {
                let arguments = attribute
                    .constructor_arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let named = attribute
                    .named_arguments
                    .iter()
                    .map(|arg| format!("{} = {}", arg.name, arg.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    attribute.line.to_string(),
                    attribute.attribute_class.qualified_name(),
                    attribute.attribute_class.assembly().to_string(),
                    arguments,
                    named,
                ]
            })
            .collect()
    }
}

impl TableView for ScenarioReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["line", "expected", "observed", "identity", "args", "result"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.verdicts
            .iter()
            .map(|verdict| {
                let result = if verdict.passed() {
                    "pass".to_string()
                } else {
                    verdict
                        .failures()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                vec![
                    verdict.line.to_string(),
                    verdict.expected.to_string(),
                    verdict.observed.to_string(),
                    verdict.identity_equals.to_string(),
                    format!(
                        "{}/{}",
                        verdict.argument_count, verdict.expected_argument_count
                    ),
                    result,
                ]
            })
            .collect()
    }
}
