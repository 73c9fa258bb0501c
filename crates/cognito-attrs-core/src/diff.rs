//! Set difference between desired attributes and an existing name list.

use crate::model::DesiredAttribute;
use crate::names::normalize;

/// Returns the desired attributes whose normalized name is not in `existing`.
///
/// Comparison is exact and case-sensitive. The result keeps the order of
/// `desired` and contains the original entries, not their normalized names.
/// Duplicates in `desired` are each tested on their own, so a missing name
/// listed twice is returned twice.
pub fn missing<S: AsRef<str>>(desired: &[DesiredAttribute], existing: &[S]) -> Vec<DesiredAttribute> {
    desired
        .iter()
        .filter(|attr| {
            let name = normalize(&attr.name);
            !existing.iter().any(|e| e.as_ref() == name)
        })
        .cloned()
        .collect()
}
