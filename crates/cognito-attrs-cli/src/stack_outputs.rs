use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cognito_attrs_core::{StackDescription, StackOutput};
use serde::Deserialize;

/// Accepted layouts for an outputs file.
#[derive(Deserialize)]
#[serde(untagged)]
enum OutputsDocument {
    /// `[{"OutputKey": ..., "OutputValue": ...}]`
    List(Vec<StackOutput>),
    /// The document `aws cloudformation describe-stacks` prints.
    Stacks {
        #[serde(rename = "Stacks")]
        stacks: Vec<StackDescription>,
    },
    /// A single stack description.
    Stack(StackDescription),
}

/// Reads stack outputs from a JSON file.
///
/// `None` means the file describes no stack at all (an empty `Stacks` list),
/// which reconciliation treats like a stack that was never deployed.
pub fn load(path: &Path) -> Result<Option<Vec<StackOutput>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read outputs file {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid outputs file {}", path.display()))
}

fn parse(content: &str) -> Result<Option<Vec<StackOutput>>> {
    let document: OutputsDocument = serde_json::from_str(content)?;
    Ok(match document {
        OutputsDocument::List(outputs) => Some(outputs),
        OutputsDocument::Stacks { stacks } => stacks
            .into_iter()
            .next()
            .map(|stack| stack.outputs().to_vec()),
        OutputsDocument::Stack(stack) => Some(stack.outputs().to_vec()),
    })
}
