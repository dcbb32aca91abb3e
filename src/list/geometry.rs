use std::cmp::Ordering;

use super::{Element, IntervalList, NumberList, Polygon, TypedList};
use crate::{
    containers::TypedContainer,
    core::TypeTag,
    value::{Interval, Point, Value},
};

impl Element for Point {
    const LIST_TAG: TypeTag = TypeTag::Polygon;

    fn kind(&self) -> TypeTag {
        TypeTag::Point
    }

    fn to_value(&self) -> Value {
        Value::Point(*self)
    }

    fn from_value(value: &Value, _force: bool) -> Option<Self> {
        match value {
            Value::Point(point) => Some(*point),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::Polygon(list)
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        let polygon = Polygon::from_vec(items.to_vec());
        let mut lines = Vec::new();
        if let Some(barycenter) = polygon.get_barycenter() {
            lines.push(format!("barycenter: {}", barycenter));
        }
        lines.push(format!("perimeter: {}", polygon.get_perimeter()));
        lines
    }
}

impl Element for Interval {
    const LIST_TAG: TypeTag = TypeTag::IntervalList;

    fn kind(&self) -> TypeTag {
        TypeTag::Interval
    }

    fn to_value(&self) -> Value {
        Value::Interval(*self)
    }

    fn from_value(value: &Value, _force: bool) -> Option<Self> {
        match value {
            Value::Interval(interval) => Some(*interval),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.x.total_cmp(&other.x).then(self.y.total_cmp(&other.y))
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::IntervalList(list)
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        match IntervalList::from_vec(items.to_vec()).get_interval() {
            Some(interval) => vec![format!("covers: {}", interval)],
            None => Vec::new(),
        }
    }
}

impl TypedList<Point> {
    pub fn get_x_values(&self) -> NumberList {
        self.iter().map(|point| point.x).collect()
    }

    pub fn get_y_values(&self) -> NumberList {
        self.iter().map(|point| point.y).collect()
    }

    /// Average of the vertices.
    pub fn get_barycenter(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(Point::new(
            self.get_x_values().get_average(),
            self.get_y_values().get_average(),
        ))
    }

    /// Length of the closed outline, last vertex joined back to the first.
    pub fn get_perimeter(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        self.iter()
            .zip(self.iter().cycle().skip(1))
            .map(|(a, b)| a.distance_to(b))
            .sum()
    }
}

impl TypedList<Interval> {
    pub fn get_amplitudes(&self) -> NumberList {
        self.iter()
            .map(Interval::amplitude)
            .collect::<NumberList>()
            .named(self.name.clone())
    }

    /// Smallest interval covering every interval.
    pub fn get_interval(&self) -> Option<Interval> {
        let min = self.iter().map(Interval::min).reduce(f64::min)?;
        let max = self.iter().map(Interval::max).reduce(f64::max)?;
        Some(Interval::new(min, max))
    }
}
