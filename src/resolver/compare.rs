//! Cross-resolution comparison

use std::collections::BTreeMap;

use serde::Serialize;

use super::source::Resolution;

/// A variable present on both sides with differing final values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffVar {
    pub name: String,
    pub first_value: String,
    pub second_value: String,
}

/// The outcome of comparing two resolutions. Ephemeral; recomputed on
/// demand, never persisted. All lists are sorted by name.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResult {
    /// Names resolved only in the first resolution
    pub only_in_first: Vec<String>,
    /// Names resolved only in the second resolution
    pub only_in_second: Vec<String>,
    /// Names with differing final values
    pub different: Vec<DiffVar>,
    /// Names with identical final values
    pub same: Vec<String>,
}

/// Compare the final values of two resolutions.
///
/// Pure function of the two inputs; neither side is mutated.
pub fn compare(first: &Resolution, second: &Resolution) -> CompareResult {
    let first_vars: BTreeMap<&str, &str> = first
        .variables
        .iter()
        .map(|v| (v.name.as_str(), v.final_value.as_str()))
        .collect();
    let second_vars: BTreeMap<&str, &str> = second
        .variables
        .iter()
        .map(|v| (v.name.as_str(), v.final_value.as_str()))
        .collect();

    let mut result = CompareResult {
        only_in_first: Vec::new(),
        only_in_second: Vec::new(),
        different: Vec::new(),
        same: Vec::new(),
    };

    for (&name, &first_value) in &first_vars {
        match second_vars.get(name) {
            None => result.only_in_first.push(name.to_string()),
            Some(&second_value) if first_value != second_value => {
                result.different.push(DiffVar {
                    name: name.to_string(),
                    first_value: first_value.to_string(),
                    second_value: second_value.to_string(),
                });
            }
            Some(_) => result.same.push(name.to_string()),
        }
    }

    for &name in second_vars.keys() {
        if !first_vars.contains_key(name) {
            result.only_in_second.push(name.to_string());
        }
    }

    // BTreeMap iteration already yields names in sorted order.
    result
}
