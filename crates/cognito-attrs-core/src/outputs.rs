//! Lookup of resource identifiers in stack outputs.

use crate::error::ReconcileError;
use crate::model::StackOutput;

/// Finds the value of the output named `key`.
///
/// `None` for `outputs` means no stack was found and yields `Ok(None)`. A
/// present stack without a matching output is a misconfiguration and fails
/// with [`ReconcileError::OutputNotFound`].
pub fn resolve_output(
    outputs: Option<&[StackOutput]>,
    key: &str,
) -> Result<Option<String>, ReconcileError> {
    let Some(outputs) = outputs else {
        return Ok(None);
    };

    outputs
        .iter()
        .find(|output| output.output_key == key)
        .map(|output| Some(output.output_value.clone()))
        .ok_or_else(|| ReconcileError::output_not_found(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs() -> Vec<StackOutput> {
        vec![
            StackOutput::new("UserPoolId", "eu-west-1_abc"),
            StackOutput::new("UserPoolClientId", "client-1"),
            StackOutput::new("UserPoolId", "shadowed"),
        ]
    }

    #[test]
    fn finds_first_matching_output() {
        let outputs = outputs();
        let value = resolve_output(Some(outputs.as_slice()), "UserPoolId").unwrap();
        assert_eq!(value.as_deref(), Some("eu-west-1_abc"));
    }

    #[test]
    fn absent_stack_resolves_to_none() {
        assert_eq!(resolve_output(None, "UserPoolId").unwrap(), None);
    }

    #[test]
    fn missing_key_on_present_stack_is_an_error() {
        let outputs = outputs();
        let err = resolve_output(Some(outputs.as_slice()), "Nope").unwrap_err();
        assert!(matches!(err, ReconcileError::OutputNotFound { ref key } if key == "Nope"));
        assert_eq!(err.kind(), "OutputNotFoundError");
    }

    #[test]
    fn empty_outputs_are_still_a_present_stack() {
        let err = resolve_output(Some(&[][..]), "UserPoolId").unwrap_err();
        assert_eq!(err.kind(), "OutputNotFoundError");
    }

    #[test]
    fn key_match_is_exact() {
        let outputs = outputs();
        assert!(resolve_output(Some(outputs.as_slice()), "userpoolid").is_err());
    }
}
