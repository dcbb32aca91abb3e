//! Delimited text to [`Table`] and back.
//!
//! Records are one per line, except that a quoted field may span lines.
//! Fields may be quoted with `"`, a doubled `""` inside quotes standing for
//! one quote character; unquoted fields cannot contain quotes. Rows with
//! fewer fields than the widest row are padded with `Null` so every column
//! keeps one cell per record, and a warning names each short row.

use log::warn;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, none_of},
    combinator::{all_consuming, map, value},
    multi::{fold_many0, separated_list1},
    sequence::delimited,
};

use super::CsvOptions;
use crate::{
    containers::{TypedContainer, refine_columns},
    errors::{ListError, Result},
    list::{List, Table},
    types::WithWarnings,
    value::{Value, coerce},
};

fn quoted_field(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((value('"', tag("\"\"")), none_of("\""))),
            String::new,
            |mut field, c| {
                field.push(c);
                field
            },
        ),
        char('"'),
    )
    .parse(input)
}

fn record(input: &str, separator: char) -> IResult<&str, Vec<String>> {
    separated_list1(
        char(separator),
        alt((
            quoted_field,
            map(take_till(move |c| c == separator || c == '"'), str::to_string),
        )),
    )
    .parse(input)
}

/// Splits one line into fields.
///
/// # Errors
///
/// [`ListError::Parse`] for unterminated quotes or text after a closing
/// quote.
pub fn parse_record(line: &str, separator: char, line_number: usize) -> Result<Vec<String>> {
    all_consuming(|input| record(input, separator))
        .parse(line)
        .map(|(_, fields)| fields)
        .map_err(|err| ListError::Parse {
            line: line_number,
            message: format!("malformed record: {}", err),
        })
}

/// Groups physical lines into records: a line that leaves a quote open is
/// joined to the next one with `\n`. Each record carries its first line
/// number. Blank lines outside quotes are dropped.
fn records(text: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (index, line) in text.lines().enumerate() {
        let (start, record) = match pending.take() {
            Some((start, mut record)) => {
                record.push('\n');
                record.push_str(line);
                (start, record)
            }
            None if line.trim().is_empty() => continue,
            None => (index + 1, line.to_string()),
        };
        if record.matches('"').count() % 2 == 1 {
            pending = Some((start, record));
        } else {
            records.push((start, record));
        }
    }
    // an unterminated quote reaches the parser and is reported there
    records.extend(pending);
    records
}

/// Decodes delimited text into a refined table, one column per field.
///
/// Cells that read as numbers become numbers and everything else stays
/// text, so each column refines on its own: a column of numbers becomes a
/// `NumberList` and a table of them a `NumberTable`. Blank lines are
/// skipped. Cells missing from short rows are `Null`, which keeps the rows
/// aligned but leaves such a column a plain `List`.
///
/// # Errors
///
/// [`ListError::Parse`] with the 1-based line of the first malformed record.
pub fn table_from_csv(
    text: &str,
    options: &CsvOptions,
) -> Result<WithWarnings<TypedContainer, String>> {
    let mut rows = Vec::new();
    for (line, record) in records(text) {
        rows.push((line, parse_record(&record, options.separator, line)?));
    }

    let mut warnings = Vec::new();
    let headers = if options.first_row_as_headers && !rows.is_empty() {
        rows.remove(0).1
    } else {
        Vec::new()
    };

    let width = rows
        .iter()
        .map(|(_, fields)| fields.len())
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); width];
    let mut rewritten = 0;
    for (line, fields) in &rows {
        if fields.len() < width {
            let message = format!(
                "row at line {} has {} fields, expected {}",
                line,
                fields.len(),
                width
            );
            warn!("{}", message);
            warnings.push(message);
        }
        for column in columns.iter_mut().skip(fields.len()) {
            column.push(Value::Null);
        }
        for (column, field) in columns.iter_mut().zip(fields) {
            let normalized = options
                .normalize_decimal_commas
                .then(|| coerce::normalize_decimal_comma(field))
                .flatten();
            match normalized {
                Some(number) => {
                    rewritten += 1;
                    column.push(coerce::infer(&number));
                }
                None => column.push(coerce::infer(field)),
            }
        }
    }
    if rewritten > 0 {
        warnings.push(format!("rewrote {} decimal commas as points", rewritten));
    }

    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(index, values)| {
            let name = headers.get(index).cloned().unwrap_or_default();
            List::from_vec(values).named(name).into_container()
        })
        .collect();

    Ok(WithWarnings::from_parts(refine_columns("", columns), warnings))
}

fn escape(field: &str, separator: char) -> String {
    if field.contains(separator) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Encodes a table row by row. Missing cells of a ragged table are left
/// empty. The header row holds the column names when
/// `options.first_row_as_headers` is set.
pub fn table_to_csv(table: &Table, options: &CsvOptions) -> String {
    let separator = options.separator.to_string();
    let mut lines = Vec::new();
    if options.first_row_as_headers {
        lines.push(
            table
                .iter()
                .map(|column| escape(column.name(), options.separator))
                .collect::<Vec<_>>()
                .join(&separator),
        );
    }
    for row in 0..table.get_rows_count() {
        lines.push(
            table
                .iter()
                .map(|column| escape(&coerce::to_string(&column.value_at(row)), options.separator))
                .collect::<Vec<_>>()
                .join(&separator),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::TypeTag;

    fn options() -> CsvOptions {
        CsvOptions::default()
    }

    mod record_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_plain_and_quoted_fields() {
            assert_eq!(
                parse_record(r#"a,"b,c","say ""hi""",,"#, ',', 1).unwrap(),
                vec!["a", "b,c", "say \"hi\"", "", ""]
            );
            assert_eq!(parse_record("x;y", ';', 1).unwrap(), vec!["x", "y"]);
        }

        #[test]
        fn test_malformed_record() {
            let err = parse_record(r#"a,"open"#, ',', 4).unwrap_err();
            assert!(matches!(err, ListError::Parse { line: 4, .. }));
            assert!(parse_record(r#""a"b,c"#, ',', 1).is_err());
        }
    }

    mod decode_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_columns_are_refined() {
            let (table, warnings): (TypedContainer, Vec<String>) =
                table_from_csv("key,value\na,1\nb,2\na,3\n", &options())
                    .unwrap()
                    .into();
            assert!(warnings.is_empty());
            assert_eq!(table.type_tag(), TypeTag::Table);
            let table = table.to_table().unwrap();
            assert_eq!(table.get_names().items(), &["key", "value"]);
            assert_eq!(table[0].type_tag(), TypeTag::StringList);
            assert_eq!(table[1].type_tag(), TypeTag::NumberList);
        }

        #[test]
        fn test_numeric_table() {
            let decoded = table_from_csv("1,2\n3,4", &CsvOptions {
                first_row_as_headers: false,
                ..options()
            })
            .unwrap()
            .unwrap();
            assert_eq!(decoded.type_tag(), TypeTag::NumberTable);
            let numbers = decoded.as_number_table().unwrap();
            assert_eq!(numbers.get_rows_sums().unwrap().items(), &[3.0, 7.0]);
        }

        #[test]
        fn test_decimal_commas() {
            let semicolons = CsvOptions {
                separator: ';',
                ..options()
            };
            let result = table_from_csv("x;y\n1,5;a\n2,25;b", &semicolons).unwrap();
            assert!(result.is_warning());
            let (table, warnings): (TypedContainer, Vec<String>) = result.into();
            assert_eq!(warnings, vec!["rewrote 2 decimal commas as points".to_string()]);
            let x = table.to_table().unwrap()[0].clone();
            assert_eq!(x.to_values(), vec![Value::from(1.5), Value::from(2.25)]);
        }

        #[test]
        fn test_short_rows_are_padded() {
            let (table, warnings): (TypedContainer, Vec<String>) =
                table_from_csv("a,b\n1\n3,4\n", &options()).unwrap().into();
            assert_eq!(warnings.len(), 1);
            assert!(warnings[0].contains("line 2"));
            let table = table.to_table().unwrap();
            assert_eq!(table.get_lengths().items(), &[2.0, 2.0]);
            assert_eq!(table[0].type_tag(), TypeTag::NumberList);
            assert_eq!(table[1].type_tag(), TypeTag::List);
            assert_eq!(table.get_row(0).to_values(), vec![Value::from(1.0), Value::Null]);
            assert_eq!(
                table.get_row(1).to_values(),
                vec![Value::from(3.0), Value::from(4.0)]
            );
        }

        #[test]
        fn test_quoted_field_spans_lines() {
            let text = "id,note\n1,\"two\nlines\"\n\n2,\"with \"\"quote\"\"\"";
            let table = table_from_csv(text, &options()).unwrap().unwrap().to_table().unwrap();
            assert_eq!(
                table[1].to_values(),
                vec![Value::from("two\nlines"), Value::from("with \"quote\"")]
            );
            assert_eq!(table_to_csv(&table, &options()), text.replace("\n\n", "\n"));
        }

        #[test]
        fn test_unterminated_quote_reports_its_first_line() {
            let err = table_from_csv("a,b\n1,\"open\n2,3\n", &options()).unwrap_err();
            assert!(matches!(err, ListError::Parse { line: 2, .. }));
        }

        #[test]
        fn test_parse_error_reports_line() {
            let err = table_from_csv("a,b\n\n\"x,1\n", &options()).unwrap_err();
            assert!(matches!(err, ListError::Parse { line: 3, .. }));
        }
    }

    #[test]
    fn test_encode_round_trip() {
        let text = "name,score\n\"Smith, J\",1.5\nLee,2";
        let decoded = table_from_csv(text, &options()).unwrap().unwrap();
        let table = decoded.to_table().unwrap();
        assert_eq!(table_to_csv(&table, &options()), text);
    }
}
