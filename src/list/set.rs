//! Counting, deduplication and structural edits.

use std::collections::{HashMap, HashSet};

use super::{DedupKey, Element, List, NumberList, TypedList};
use crate::{
    containers::TypedContainer,
    errors::{ListError, Result},
    value::Value,
};

/// Distinct elements with their parallel occurrence counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementsRepetition<T> {
    pub elements: TypedList<T>,
    pub counts: NumberList,
}

impl<T: Element> TypedList<T> {
    /// Keys for every element, or `None` as soon as one element has none.
    fn dedup_keys(&self) -> Option<Vec<DedupKey>> {
        self.iter().map(Element::dedup_key).collect()
    }

    /// Distinct elements in first-seen order with their counts. With
    /// `sort_by_occurrences` the pairs are reordered most frequent first;
    /// equal counts keep first-seen order.
    pub fn get_elements_repetition_count(&self, sort_by_occurrences: bool) -> ElementsRepetition<T> {
        let mut elements: Vec<T> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();

        match self.dedup_keys() {
            Some(keys) => {
                let mut positions: HashMap<DedupKey, usize> = HashMap::new();
                for (element, key) in self.iter().zip(keys) {
                    match positions.get(&key) {
                        Some(&position) => counts[position] += 1,
                        None => {
                            positions.insert(key, elements.len());
                            elements.push(element.clone());
                            counts.push(1);
                        }
                    }
                }
            }
            None => {
                for element in self.iter() {
                    match elements.iter().position(|seen| seen == element) {
                        Some(position) => counts[position] += 1,
                        None => {
                            elements.push(element.clone());
                            counts.push(1);
                        }
                    }
                }
            }
        }

        let mut order: Vec<usize> = (0..elements.len()).collect();
        if sort_by_occurrences {
            order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
        }

        ElementsRepetition {
            elements: self.derive(order.iter().map(|&i| elements[i].clone()).collect()),
            counts: NumberList::from_vec(order.iter().map(|&i| counts[i] as f64).collect()),
        }
    }

    pub fn count_element(&self, element: &T) -> usize {
        self.iter().filter(|candidate| *candidate == element).count()
    }

    /// The most frequent element; the first seen wins a tie.
    pub fn get_most_repeated_element(&self) -> Option<T> {
        self.get_elements_repetition_count(true)
            .elements
            .into_vec()
            .into_iter()
            .next()
    }

    pub fn get_min(&self) -> Option<T> {
        T::min_of(self)
    }

    pub fn get_max(&self) -> Option<T> {
        T::max_of(self)
    }

    /// Drops repeated elements; the first occurrence wins.
    ///
    /// Kinds with a hashable identity take a linear path; the others fall
    /// back to pairwise comparison. Both keep the same elements in the same
    /// order.
    pub fn get_without_repetitions(&self) -> Self {
        match self.dedup_keys() {
            Some(keys) => {
                let mut seen = HashSet::new();
                self.derive(
                    self.iter()
                        .zip(keys)
                        .filter(|(_, key)| seen.insert(key.clone()))
                        .map(|(element, _)| element.clone())
                        .collect(),
                )
            }
            None => {
                let mut unique: Vec<T> = Vec::new();
                for element in self.iter() {
                    if !unique.contains(element) {
                        unique.push(element.clone());
                    }
                }
                self.derive(unique)
            }
        }
    }

    pub fn get_without_element(&self, element: &T) -> Self {
        self.get_filtered_by_function(|candidate| candidate != element)
    }

    pub fn get_without_elements(&self, elements: &[T]) -> Self {
        self.get_filtered_by_function(|candidate| !elements.contains(candidate))
    }

    pub fn get_without_element_at_index(&self, index: usize) -> Self {
        self.get_without_elements_at_indexes(&[index])
    }

    pub fn get_without_elements_at_indexes(&self, indexes: &[usize]) -> Self {
        self.derive(
            self.iter()
                .enumerate()
                .filter(|(i, _)| !indexes.contains(i))
                .map(|(_, element)| element.clone())
                .collect(),
        )
    }

    /// Elements of `self` followed by those of `other`, under this name.
    pub fn concat(&self, other: &TypedList<T>) -> Self {
        self.derive(self.iter().chain(other.iter()).cloned().collect())
    }

    /// Removes `delete_count` elements from `start` and inserts `insert` in
    /// their place. Both bounds are clamped. Returns the removed elements as
    /// a list of the same kind.
    pub fn splice(&mut self, start: usize, delete_count: usize, insert: Vec<T>) -> Self {
        let start = start.min(self.len());
        let end = start.saturating_add(delete_count).min(self.len());
        let removed: Vec<T> = self.items.splice(start..end, insert).collect();
        self.derive(removed)
    }

    /// Pushes unless an equal element is present. Returns whether it did.
    pub fn push_if_unique(&mut self, element: T) -> bool {
        if self.contains(&element) {
            false
        } else {
            self.push(element);
            true
        }
    }

    /// Removes the first occurrence of `element`.
    pub fn remove_element(&mut self, element: &T) -> Option<T> {
        let index = self.index_of_element(element)?;
        Some(self.items.remove(index))
    }

    /// Removes every occurrence of each of `elements`. Returns how many
    /// elements were removed.
    pub fn remove_elements(&mut self, elements: &[T]) -> usize {
        let before = self.len();
        self.items.retain(|candidate| !elements.contains(candidate));
        before - self.len()
    }

    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] when `index` is past the end.
    pub fn remove_element_at_index(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes the elements at `indexes` (in any order, repeats ignored) and
    /// returns them in list order. Nothing is removed if any index is out of
    /// range.
    pub fn remove_elements_at_indexes(&mut self, indexes: &[usize]) -> Result<Vec<T>> {
        let len = self.len();
        if let Some(&index) = indexes.iter().find(|&&index| index >= len) {
            return Err(ListError::IndexOutOfRange { index, len });
        }
        let doomed: HashSet<usize> = indexes.iter().copied().collect();
        let (removed, kept): (Vec<(usize, T)>, Vec<(usize, T)>) = std::mem::take(&mut self.items)
            .into_iter()
            .enumerate()
            .partition(|(i, _)| doomed.contains(i));
        self.items = kept.into_iter().map(|(_, element)| element).collect();
        Ok(removed.into_iter().map(|(_, element)| element).collect())
    }

    /// Replaces every occurrence of `old`. Returns the number replaced.
    pub fn replace(&mut self, old: &T, new: T) -> usize {
        let mut replaced = 0;
        for element in self.items.iter_mut().filter(|element| *element == old) {
            *element = new.clone();
            replaced += 1;
        }
        replaced
    }

    /// Names the elements from `names`, cycling when there are fewer names
    /// than elements. Kinds without a name are left untouched.
    pub fn assign_names(&mut self, names: &[&str]) {
        if names.is_empty() {
            return;
        }
        for (i, element) in self.items.iter_mut().enumerate() {
            element.assign_name(names[i % names.len()]);
        }
    }

    /// Maps every element and refines the result, since a mapping may make
    /// the elements homogeneous (or not).
    pub fn apply_function<F>(&self, function: F) -> TypedContainer
    where
        F: Fn(&T) -> Value,
    {
        List::from_vec(self.iter().map(function).collect())
            .named(self.name.clone())
            .get_improved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::TypeTag,
        list::{StringList, Table},
    };

    fn strings(items: &[&str]) -> StringList {
        items.iter().map(|s| s.to_string()).collect()
    }

    mod repetition_tests {
        use super::*;

        #[test]
        fn test_repetition_count_first_seen_order() {
            let counted = strings(&["b", "a", "b", "c", "a", "a"]).get_elements_repetition_count(false);
            assert_eq!(counted.elements.items(), &["b", "a", "c"]);
            assert_eq!(counted.counts.items(), &[2.0, 3.0, 1.0]);
        }

        #[test]
        fn test_repetition_count_sorted_is_stable() {
            let counted = strings(&["x", "y", "z", "y", "x", "w"]).get_elements_repetition_count(true);
            assert_eq!(counted.elements.items(), &["x", "y", "z", "w"]);
            assert_eq!(counted.counts.items(), &[2.0, 2.0, 1.0, 1.0]);
        }

        #[test]
        fn test_quadratic_path_agrees() {
            let values = List::from_vec(
                [3.0, 1.0, 3.0, 2.0, 1.0].iter().map(|n| Value::from(*n)).collect(),
            );
            let counted = values.get_elements_repetition_count(false);
            assert_eq!(counted.counts.items(), &[2.0, 2.0, 1.0]);
            assert_eq!(
                values.get_most_repeated_element(),
                Some(Value::from(3.0))
            );
        }

        #[test]
        fn test_count_element() {
            assert_eq!(strings(&["a", "b", "a"]).count_element(&"a".to_string()), 2);
        }
    }

    mod without_tests {
        use super::*;

        #[test]
        fn test_without_repetitions_both_paths() {
            let fast = NumberList::from_vec(vec![3.0, 1.0, 3.0, 2.0, 1.0]);
            let slow = List::from_vec(fast.to_values());
            assert_eq!(fast.get_without_repetitions().items(), &[3.0, 1.0, 2.0]);
            assert_eq!(
                slow.get_without_repetitions().to_values(),
                fast.get_without_repetitions().to_values()
            );
        }

        #[test]
        fn test_without_element_variants() {
            let list = strings(&["a", "b", "c", "b"]);
            assert_eq!(list.get_without_element(&"b".to_string()).items(), &["a", "c"]);
            assert_eq!(
                list.get_without_elements(&["a".to_string(), "c".to_string()]).items(),
                &["b", "b"]
            );
            assert_eq!(list.get_without_element_at_index(0).items(), &["b", "c", "b"]);
            assert_eq!(list.get_without_elements_at_indexes(&[1, 3, 9]).items(), &["a", "c"]);
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn test_splice_returns_removed_segment() {
            let mut list = strings(&["a", "b", "c", "d"]).named("s");
            let removed = list.splice(1, 2, vec!["x".to_string()]);
            assert_eq!(list.items(), &["a", "x", "d"]);
            assert_eq!(removed.items(), &["b", "c"]);
            assert_eq!(removed.name, "s");
            assert_eq!(removed.type_tag(), TypeTag::StringList);
        }

        #[test]
        fn test_splice_clamps() {
            let mut list = strings(&["a"]);
            let removed = list.splice(5, 10, vec!["z".to_string()]);
            assert!(removed.is_empty());
            assert_eq!(list.items(), &["a", "z"]);
        }

        #[test]
        fn test_removal_by_index_is_checked() {
            let mut list = strings(&["a", "b", "c"]);
            assert!(matches!(
                list.remove_element_at_index(3),
                Err(ListError::IndexOutOfRange { index: 3, len: 3 })
            ));
            assert_eq!(list.remove_element_at_index(1).unwrap(), "b");

            let mut list = strings(&["a", "b", "c", "d"]);
            assert!(list.remove_elements_at_indexes(&[0, 7]).is_err());
            assert_eq!(list.len(), 4);
            let removed = list.remove_elements_at_indexes(&[3, 0, 3]).unwrap();
            assert_eq!(removed, vec!["a".to_string(), "d".to_string()]);
            assert_eq!(list.items(), &["b", "c"]);
        }

        #[test]
        fn test_push_if_unique_and_replace() {
            let mut list = strings(&["a"]);
            assert!(!list.push_if_unique("a".to_string()));
            assert!(list.push_if_unique("b".to_string()));
            list.push("a".to_string());
            assert_eq!(list.replace(&"a".to_string(), "z".to_string()), 2);
            assert_eq!(list.items(), &["z", "b", "z"]);
            assert_eq!(list.remove_elements(&["z".to_string()]), 2);
            assert_eq!(list.remove_element(&"b".to_string()), Some("b".to_string()));
            assert!(list.is_empty());
        }

        #[test]
        fn test_assign_names_cycles() {
            let mut table = Table::from_vec(vec![
                NumberList::new().into_container(),
                NumberList::new().into_container(),
                NumberList::new().into_container(),
            ]);
            table.assign_names(&["p", "q"]);
            let names: Vec<&str> = table.iter().map(|column| column.name()).collect();
            assert_eq!(names, vec!["p", "q", "p"]);
        }
    }

    #[test]
    fn test_apply_function_refines_result() {
        let list = strings(&["1", "22", "333"]).named("words");
        let lengths = list.apply_function(|s| Value::from(s.len() as f64));
        assert_eq!(lengths.type_tag(), TypeTag::NumberList);
        assert_eq!(lengths.name(), "words");

        let mixed = list.apply_function(|s| {
            if s.len() > 1 {
                Value::from(s.as_str())
            } else {
                Value::Null
            }
        });
        assert_eq!(mixed.type_tag(), TypeTag::List);
    }
}
