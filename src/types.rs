/// Outcome of a container self-check.
///
/// Warnings describe states that are legal but worth surfacing (a ragged
/// table, a numeric column holding `NaN`); errors describe broken invariants.
///
/// # Examples
///
/// ```rust
/// use listkit::types::{Validate, ValidationResult};
/// use listkit::{NumberList, TypedContainer};
///
/// let column = TypedContainer::NumberList(NumberList::from_vec(vec![1.0, f64::NAN]));
/// assert!(matches!(column.validate(), ValidationResult::Warnings(_, _)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = ()> {
    /// No issues found.
    Valid(T),
    /// Valid, with diagnostics.
    Warnings(T, Vec<String>),
    /// Invalid: (warnings, errors).
    Invalid(Vec<String>, Vec<String>),
}

impl<T> ValidationResult<T> {
    /// Checks if the result carries no errors.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ValidationResult::Invalid(_, _))
    }

    /// Collects every warning, regardless of validity.
    pub fn warnings(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Warnings(_, warnings) => warnings,
            ValidationResult::Invalid(warnings, _) => warnings,
        }
    }

    /// Collects every error.
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Invalid(_, errors) => errors,
            _ => &[],
        }
    }
}

/// Types that can check their own invariants.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

/// A result type that can contain warnings alongside the successful result.
///
/// This enum allows functions to return successful results while still
/// providing diagnostic information about potential issues encountered
/// during processing (e.g., ragged rows, rewritten decimal separators).
///
/// # Type Parameters
///
/// * `T` - The success result type
/// * `W` - The warning type (typically `String` for warning messages)
///
/// # Examples
///
/// ```rust
/// use listkit::types::WithWarnings;
///
/// let result = WithWarnings::Warning("decoded".to_string(), vec!["Row 3 is short".to_string()]);
/// assert!(result.is_warning());
/// assert_eq!(result.clone().unwrap(), "decoded");
///
/// let warnings = result.warnings();
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WithWarnings<T, W> {
    /// Successful result without warnings
    Ok(T),
    /// Successful result with warnings
    Warning(T, Vec<W>),
}

impl<T, W> WithWarnings<T, W> {
    /// Wraps a value, attaching warnings only when there are any.
    pub fn from_parts(data: T, warnings: Vec<W>) -> Self {
        if warnings.is_empty() {
            WithWarnings::Ok(data)
        } else {
            WithWarnings::Warning(data, warnings)
        }
    }

    /// Checks if the result is successful without warnings.
    pub fn is_ok(&self) -> bool {
        matches!(self, WithWarnings::Ok(_))
    }

    /// Checks if the result has warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, WithWarnings::Warning(_, _))
    }

    /// Extracts the result value, discarding any warnings.
    pub fn unwrap(self) -> T {
        match self {
            WithWarnings::Ok(data) => data,
            WithWarnings::Warning(data, _) => data,
        }
    }

    /// Extracts the warnings, discarding the result value.
    ///
    /// Returns an empty vector if there were no warnings.
    pub fn warnings(self) -> Vec<W> {
        match self {
            WithWarnings::Ok(_) => Vec::new(),
            WithWarnings::Warning(_, warnings) => warnings,
        }
    }
}

impl<T, W> From<WithWarnings<T, W>> for (T, Vec<W>) {
    /// Converts `WithWarnings` into a tuple of (result, warnings).
    fn from(value: WithWarnings<T, W>) -> Self {
        match value {
            WithWarnings::Ok(data) => (data, Vec::new()),
            WithWarnings::Warning(data, warnings) => (data, warnings),
        }
    }
}
