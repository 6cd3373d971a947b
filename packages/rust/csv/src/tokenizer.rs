//! Single-pass CSV scanner.

use crate::ContentRow;

const BOM: char = '\u{feff}';

/// Tokenize a CSV document into rows of raw (untrimmed) cells.
///
/// Every line terminator outside quotes closes a row, so an empty line
/// yields a row with one empty cell; [`crate::parse`] filters those out.
/// A terminator at the very end of the input does not open a new row.
pub fn tokenize(text: &str) -> Vec<ContentRow> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Set once anything (cell text, quote, separator) belongs to the open row.
    let mut row_open = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                row_open = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_open = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(ContentRow::new(std::mem::take(&mut row)));
                row_open = false;
            }
            _ => {
                field.push(c);
                row_open = true;
            }
        }
    }

    if row_open {
        row.push(field);
        rows.push(ContentRow::new(row));
    }

    rows
}
