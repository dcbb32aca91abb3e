use crate::types::ValidationResult;

pub fn _chain<T>(
    result: ValidationResult<T>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    match result {
        ValidationResult::Valid(_) => {}
        ValidationResult::Warnings(_, warns) => {
            warnings.extend(warns);
        }
        ValidationResult::Invalid(warns, errs) => {
            warnings.extend(warns);
            errors.extend(errs);
        }
    }
}

pub fn _return(warnings: Vec<String>, errors: Vec<String>) -> ValidationResult {
    if !errors.is_empty() {
        ValidationResult::Invalid(warnings, errors)
    } else if !warnings.is_empty() {
        ValidationResult::Warnings((), warnings)
    } else {
        ValidationResult::Valid(())
    }
}

/// Prefixes every message so nested column reports stay attributable.
pub fn _prefixed(prefix: &str, result: ValidationResult) -> ValidationResult {
    let tag = |messages: &[String]| -> Vec<String> {
        messages
            .iter()
            .map(|message| format!("{}: {}", prefix, message))
            .collect()
    };
    match result {
        ValidationResult::Valid(()) => ValidationResult::Valid(()),
        ValidationResult::Warnings((), warns) => ValidationResult::Warnings((), tag(&warns)),
        ValidationResult::Invalid(warns, errs) => ValidationResult::Invalid(tag(&warns), tag(&errs)),
    }
}

pub fn warn_non_finite(values: &[f64]) -> ValidationResult {
    let mut warnings = Vec::new();

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            warnings.push(format!(
                "value at index {} is not a finite number: {}",
                i, value
            ));
        }
    }

    _return(warnings, Vec::new())
}

pub fn warn_ragged(lengths: &[usize]) -> ValidationResult {
    let mut warnings = Vec::new();

    if let Some(&first) = lengths.first() {
        for (i, &len) in lengths.iter().enumerate().skip(1) {
            if len != first {
                warnings.push(format!(
                    "column {} has length {}, but column 0 has length {}",
                    i, len, first
                ));
            }
        }
    }

    _return(warnings, Vec::new())
}
