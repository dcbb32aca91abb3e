use std::cmp::Ordering;

use itertools::Itertools;
use log::warn;

use super::{DateList, DedupKey, Element, NumberList, StringList, TypedList};
use crate::{
    containers::TypedContainer,
    core::TypeTag,
    errors::{ListError, Result},
    value::{DateConvention, Value, coerce},
};

impl Element for String {
    const LIST_TAG: TypeTag = TypeTag::StringList;

    fn kind(&self) -> TypeTag {
        TypeTag::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value, force: bool) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::Date(_) if force => {
                Some(coerce::to_string(value))
            }
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::StringList(list)
    }

    fn dedup_key(&self) -> Option<DedupKey> {
        Some(DedupKey::Text(self.clone()))
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        let list = StringList::from_vec(items.to_vec());
        let repetitions = list.get_elements_repetition_count(true);
        let mut lines = vec![format!("distinct elements: {}", repetitions.elements.len())];
        if let (Some(element), Some(count)) =
            (repetitions.elements.first(), repetitions.counts.first())
        {
            lines.push(format!("most repeated: \"{}\" ({} times)", element, count));
        }
        lines
    }
}

/// Prefix or suffix for [`TypedList::append`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextOperand<'a> {
    Text(&'a str),
    /// Co-indexed strings, reused cyclically.
    List(&'a [String]),
}

impl<'a> From<&'a str> for TextOperand<'a> {
    fn from(text: &'a str) -> Self {
        TextOperand::Text(text)
    }
}

impl<'a> From<&'a [String]> for TextOperand<'a> {
    fn from(texts: &'a [String]) -> Self {
        TextOperand::List(texts)
    }
}

impl<'a> From<&'a StringList> for TextOperand<'a> {
    fn from(texts: &'a StringList) -> Self {
        TextOperand::List(texts.items())
    }
}

impl TextOperand<'_> {
    fn at(&self, index: usize) -> &str {
        match self {
            TextOperand::Text(text) => text,
            TextOperand::List([]) => "",
            TextOperand::List(texts) => &texts[index % texts.len()],
        }
    }
}

impl TypedList<String> {
    fn map_strings(&self, f: impl Fn(usize, &str) -> String) -> Self {
        self.derive(self.iter().enumerate().map(|(i, s)| f(i, s)).collect())
    }

    /// Appends `operand` after each element, or before it when `after` is
    /// false.
    pub fn append<'a>(&self, operand: impl Into<TextOperand<'a>>, after: bool) -> Self {
        let operand = operand.into();
        if operand == TextOperand::List(&[]) {
            warn!("Appending an empty list of strings, returning a copy");
            return self.clone();
        }
        self.map_strings(|i, s| {
            if after {
                format!("{}{}", s, operand.at(i))
            } else {
                format!("{}{}", operand.at(i), s)
            }
        })
    }

    pub fn get_surrounded<'a, 'b>(
        &self,
        prefix: impl Into<TextOperand<'a>>,
        suffix: impl Into<TextOperand<'b>>,
    ) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        self.map_strings(|i, s| format!("{}{}{}", prefix.at(i), s, suffix.at(i)))
    }

    pub fn to_lower_case(&self) -> Self {
        self.map_strings(|_, s| s.to_lowercase())
    }

    pub fn to_upper_case(&self) -> Self {
        self.map_strings(|_, s| s.to_uppercase())
    }

    pub fn trim(&self) -> Self {
        self.map_strings(|_, s| s.trim().to_string())
    }

    pub fn get_concatenated(&self, separator: &str) -> String {
        self.iter().join(separator)
    }

    /// Character count of each element.
    pub fn get_lengths(&self) -> NumberList {
        self.iter()
            .map(|s| s.chars().count() as f64)
            .collect::<NumberList>()
            .named(self.name.clone())
    }

    /// Parses every element under `convention`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDate`] naming the first element that does not
    /// parse.
    pub fn to_date_list(&self, convention: &DateConvention) -> Result<DateList> {
        self.iter()
            .map(|s| {
                convention
                    .parse(s)
                    .ok_or_else(|| ListError::InvalidDate(s.clone()))
            })
            .collect::<Result<Vec<_>>>()
            .map(|dates| DateList::from_vec(dates).named(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DateFormat;

    fn words() -> StringList {
        ["Alpha", " beta ", "Gamma"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_and_trim() {
        assert_eq!(words().to_lower_case().items(), &["alpha", " beta ", "gamma"]);
        assert_eq!(words().to_upper_case()[0], "ALPHA");
        assert_eq!(words().trim()[1], "beta");
    }

    #[test]
    fn test_append_scalar_and_list() {
        let ids: StringList = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids.append("_x", true).items(), &["a_x", "b_x"]);
        assert_eq!(ids.append("x_", false).items(), &["x_a", "x_b"]);

        let suffixes: StringList = ["1", "2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids.append(&suffixes, true).items(), &["a1", "b2"]);
        assert_eq!(ids.get_surrounded("<", ">").items(), &["<a>", "<b>"]);
    }

    #[test]
    fn test_concatenated_and_lengths() {
        let ids: StringList = ["ab", "cde"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids.get_concatenated("|"), "ab|cde");
        assert_eq!(ids.get_lengths().items(), &[2.0, 3.0]);
    }

    #[test]
    fn test_to_number_list_plain_coercion() {
        let texts: StringList = ["1.5", "3,5", ""].iter().map(|s| s.to_string()).collect();
        let numbers = texts.to_number_list();
        assert_eq!(numbers[0], 1.5);
        assert!(numbers[1].is_nan());
        assert_eq!(numbers[2], 0.0);
    }

    #[test]
    fn test_to_date_list() {
        let texts: StringList = ["03/17/2024", "12/31/1999"].iter().map(|s| s.to_string()).collect();
        let convention = DateConvention::new(DateFormat::MonthDayYear, '/');
        let dates = texts.to_date_list(&convention).unwrap();
        assert_eq!(dates.len(), 2);

        let err = texts.to_date_list(&DateConvention::default()).unwrap_err();
        assert!(matches!(err, ListError::InvalidDate(text) if text == "03/17/2024"));
    }

    #[test]
    fn test_report_mentions_most_repeated() {
        let lines = String::report_lines(&["x".to_string(), "y".to_string(), "y".to_string()], 0);
        assert_eq!(lines[0], "distinct elements: 2");
        assert_eq!(lines[1], "most repeated: \"y\" (2 times)");
    }
}
