//! Attribute name canonicalization.

/// Namespace Cognito stores custom attributes under.
pub const CUSTOM_ATTRIBUTE_PREFIX: &str = "custom:";

/// Returns the stored form of a custom attribute name.
///
/// `age` becomes `custom:age`; names already carrying the prefix are returned
/// unchanged, so the function is idempotent.
pub fn normalize(name: &str) -> String {
    if name.starts_with(CUSTOM_ATTRIBUTE_PREFIX) {
        name.to_string()
    } else {
        format!("{CUSTOM_ATTRIBUTE_PREFIX}{name}")
    }
}
