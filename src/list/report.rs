use super::{Element, TypedList};

/// Indentation unit of reports.
const INDENT: &str = "  ";

pub(crate) fn report_header(indent: usize, tag: &str, name: &str, len: usize) -> Vec<String> {
    let prefix = INDENT.repeat(indent);
    vec![
        format!("{}///////////report of instance of {}//////////", prefix, tag),
        format!("{}name: {}", prefix, name),
        format!("{}type: {}", prefix, tag),
        format!("{}length: {}", prefix, len),
    ]
}

impl<T: Element> TypedList<T> {
    /// Multi-line human readable summary. The format is for reading, not
    /// parsing.
    pub fn get_report(&self, indent: usize) -> String {
        let prefix = INDENT.repeat(indent);
        let mut lines = report_header(indent, T::LIST_TAG.as_str(), &self.name, self.len());
        if !self.is_empty() {
            lines.extend(
                T::report_lines(self, indent)
                    .into_iter()
                    .map(|line| format!("{}{}", prefix, line)),
            );
        }
        lines.join("\n")
    }
}
