use std::cmp::Ordering;

use chrono::NaiveDateTime;

use super::{DateList, DedupKey, Element, NumberList, StringList, TypedList};
use crate::{
    containers::TypedContainer,
    core::TypeTag,
    value::{
        DateConvention, Value, coerce,
        date::epoch_millis,
    },
};

impl Element for NaiveDateTime {
    const LIST_TAG: TypeTag = TypeTag::DateList;

    fn kind(&self) -> TypeTag {
        TypeTag::Date
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value, force: bool) -> Option<Self> {
        match value {
            Value::Date(date) => Some(*date),
            Value::String(_) | Value::Number(_) if force => {
                coerce::to_date(value, &DateConvention::default())
            }
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::DateList(list)
    }

    fn dedup_key(&self) -> Option<DedupKey> {
        Some(DedupKey::Date(*self))
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        match DateList::from_vec(items.to_vec()).get_interval() {
            Some((earliest, latest)) => vec![
                format!("earliest: {}", earliest),
                format!("latest: {}", latest),
            ],
            None => Vec::new(),
        }
    }
}

impl TypedList<NaiveDateTime> {
    /// Milliseconds since the Unix epoch of each date.
    pub fn get_times(&self) -> NumberList {
        self.iter()
            .map(|date| epoch_millis(date) as f64)
            .collect::<NumberList>()
            .named(self.name.clone())
    }

    /// Formats every date under `convention`.
    pub fn to_string_list_with(&self, convention: &DateConvention) -> StringList {
        self.iter()
            .map(|date| convention.format(date))
            .collect::<StringList>()
            .named(self.name.clone())
    }

    /// (earliest, latest).
    pub fn get_interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.get_min()?, self.get_max()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DateFormat;

    fn dates() -> DateList {
        let convention = DateConvention::default();
        ["2024-03-17", "1970-01-02", "2001-09-09"]
            .iter()
            .filter_map(|text| convention.parse(text))
            .collect()
    }

    #[test]
    fn test_chronological_min_max() {
        let (earliest, latest) = dates().get_interval().unwrap();
        assert_eq!(earliest.format("%Y").to_string(), "1970");
        assert_eq!(latest.format("%Y").to_string(), "2024");
    }

    #[test]
    fn test_times_are_epoch_millis() {
        assert_eq!(dates().get_times()[1], 86_400_000.0);
    }

    #[test]
    fn test_string_lists() {
        assert_eq!(dates().to_string_list()[0], "2024-03-17");
        let convention = DateConvention::new(DateFormat::DayMonthYear, '.');
        assert_eq!(dates().to_string_list_with(&convention)[2], "09.09.2001");
    }

    #[test]
    fn test_forced_from_strings() {
        let dates =
            DateList::from_values(&[Value::from("2020-02-29"), Value::from(0.0)], true).unwrap();
        assert_eq!(dates.get_times().items(), &[1_582_934_400_000.0, 0.0]);
        assert!(DateList::from_values(&[Value::from("2020-02-29")], false).is_err());
    }
}
