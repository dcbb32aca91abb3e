//! # Text Encodings
//!
//! Builds containers from raw text: delimited tables through [`csv`], and
//! plain separated lists through [`list_from_text`]. Every decoded
//! container is refined, so numeric text comes back as numbers.
//!
//! ```rust
//! use listkit::encoding::{CsvOptions, table_from_csv};
//! use listkit::TypeTag;
//!
//! let table = table_from_csv("x,y\n1,2\n3,4", &CsvOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(table.type_tag(), TypeTag::NumberTable);
//! ```

pub mod csv;

use std::{fs, path::Path};

use log::debug;

use crate::{
    containers::TypedContainer,
    errors::Result,
    list::List,
    types::WithWarnings,
    value::coerce,
};

pub use csv::{parse_record, table_from_csv, table_to_csv};

/// Options for delimited text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvOptions {
    pub separator: char,
    /// The first record names the columns instead of holding data.
    pub first_row_as_headers: bool,
    /// Rewrite cells like `3,25` as `3.25` before reading numbers.
    pub normalize_decimal_commas: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            separator: ',',
            first_row_as_headers: true,
            normalize_decimal_commas: true,
        }
    }
}

/// Reads and decodes a delimited text file.
///
/// # Errors
///
/// - [`crate::ListError::Io`] if the file cannot be read
/// - [`crate::ListError::Parse`] for malformed records
pub fn read_csv_file<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
) -> Result<WithWarnings<TypedContainer, String>> {
    let text = fs::read_to_string(path.as_ref())?;
    debug!("decoding {} bytes from {}", text.len(), path.as_ref().display());
    table_from_csv(&text, options)
}

/// Splits text on `separator` into a refined list. Pieces are trimmed;
/// numeric pieces become numbers.
pub fn list_from_text(text: &str, separator: &str) -> TypedContainer {
    List::from_vec(
        text.split(separator)
            .map(|piece| coerce::infer(piece.trim()))
            .collect(),
    )
    .get_improved()
}
