use crate::{
    containers::TypedContainer,
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _prefixed, _return, warn_non_finite, warn_ragged},
};

impl Validate for TypedContainer {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        match self {
            TypedContainer::List(list) => {
                let refined = list.get_improved();
                if refined.type_tag() != self.type_tag() {
                    warnings.push(format!(
                        "list '{}' holds only elements that fit a {}",
                        list.name,
                        refined.type_tag()
                    ));
                }
            }
            TypedContainer::NumberList(list) => {
                _chain(warn_non_finite(list), &mut warnings, &mut errors);
            }
            TypedContainer::Table(table) => {
                let lengths: Vec<usize> = table.iter().map(TypedContainer::len).collect();
                _chain(warn_ragged(&lengths), &mut warnings, &mut errors);
                for column in table.iter() {
                    let prefix = format!("column '{}'", column.name());
                    _chain(_prefixed(&prefix, column.validate()), &mut warnings, &mut errors);
                }
            }
            TypedContainer::NumberTable(table) => {
                let lengths: Vec<usize> = table.iter().map(|column| column.len()).collect();
                _chain(warn_ragged(&lengths), &mut warnings, &mut errors);
                for column in table.iter() {
                    let prefix = format!("column '{}'", column.name);
                    _chain(_prefixed(&prefix, warn_non_finite(column)), &mut warnings, &mut errors);
                }
            }
            TypedContainer::NodeList(nodes) => errors.extend(nodes.index_errors()),
            TypedContainer::RelationList(relations) => errors.extend(relations.index_errors()),
            _ => {}
        }

        _return(warnings, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        list::{List, NumberList, NumberTable, Table},
        value::Value,
    };

    #[test]
    fn test_refinable_list_warns() {
        let list = List::from_vec(vec![Value::from(1.0)]).into_container();
        assert_eq!(list.validate().warnings().len(), 1);

        let mixed = List::from_vec(vec![Value::from(1.0), Value::from("a")]).into_container();
        assert!(matches!(mixed.validate(), ValidationResult::Valid(())));
    }

    #[test]
    fn test_ragged_number_table_warns() {
        let table = NumberTable::from_vec(vec![
            NumberList::from_vec(vec![1.0, 2.0]),
            NumberList::from_vec(vec![f64::NAN]).named("b"),
        ])
        .into_container();
        let result = table.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 2);
        assert!(result.warnings()[1].starts_with("column 'b': "));
    }

    #[test]
    fn test_nested_table_columns_are_checked() {
        let table = Table::from_vec(vec![
            NumberList::from_vec(vec![f64::INFINITY]).named("x").into_container(),
        ])
        .into_container();
        assert!(table.validate().warnings()[0].starts_with("column 'x': "));
    }
}
