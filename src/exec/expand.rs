use std::collections::BTreeMap;

/// Replace every literal `${KEY}` occurrence in `command` with the value
/// mapped for `KEY`.
///
/// Values are not re-scanned, so a value containing `${...}` is inserted
/// verbatim rather than expanded recursively. Unmatched placeholders are
/// left as-is. Iteration over the `BTreeMap` keeps the replacement order
/// deterministic for a fixed input.
pub fn expand_variables(command: &str, variables: &BTreeMap<String, String>) -> String {
    let mut result = command.to_string();
    for (key, value) in variables {
        let placeholder = format!("${{{key}}}");
        result = result.replace(&placeholder, value);
    }
    result
}
