//! Scan the debug log for marker-tagged data records.
//!
//! The simulator interleaves free-form log lines with structured ones:
//!
//! [   0.016667 seconds] DATA: 1,1.67E-27,1.60E-19,0.5,0.25,-0.1
//!
//! Only lines containing the fixed marker carry payload; everything else is
//! noise and skipped. The first marker line names the columns, every later
//! one is a numeric record. The scan is two-phase: resolve the schema, then
//! read rows against it.

use crate::Result;
use crate::errors::TraceError;
use crate::log::table::{Row, Schema, Table};

use regex::Regex;
use std::fs;

/// Fixed literal that tags structured log lines.
pub const DATA_MARKER: &str = " seconds] DATA: ";

/// Trailing elapsed-seconds number in the pre-marker prefix, e.g. "[   0.016667".
const ELAPSED_RE: &str = r"\[\s*([0-9]+(?:\.[0-9]+)?)\s*$";

/// Parse a debug log file into a table.
///
/// A missing or unreadable file is fatal and reported as a file-access
/// failure naming the path; there is no retry and no partial result.
pub fn parse_log_file(path: &str) -> Result<Table> {
    let text =
        fs::read_to_string(path).map_err(|source| TraceError::file_access(path, source))?;
    parse_log_text(&text)
}

/// Parse log text into a table.
///
/// A log with zero marker lines yields an empty table (empty schema, no
/// rows) rather than an error.
pub fn parse_log_text(text: &str) -> Result<Table> {
    let Some((schema, header_line)) = read_header(text) else {
        return Ok(Table::empty());
    };
    read_rows(text, header_line, schema)
}

/// Phase 1: find the first marker line and take its tokens as column names.
///
/// Returns the schema together with the header's 1-based line number so the
/// row scan knows where data starts.
fn read_header(text: &str) -> Option<(Schema, usize)> {
    for (lineno, line) in text.lines().enumerate() {
        if let Some((_, payload)) = split_marker(line) {
            let columns = payload.split(',').map(|c| c.trim().to_string()).collect();
            return Some((Schema::new(columns), lineno + 1));
        }
    }
    None
}

/// Phase 2: every marker line after the header is a numeric record.
///
/// Row order equals file order; the traces drawn downstream rely on it
/// being temporal order, so nothing here may reorder rows.
fn read_rows(text: &str, header_line: usize, schema: Schema) -> Result<Table> {
    let elapsed_re = Regex::new(ELAPSED_RE)?;
    let mut table = Table::new(schema);

    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        if lno <= header_line {
            continue;
        }

        let Some((prefix, payload)) = split_marker(line) else {
            continue;
        };

        let mut values = Vec::new();
        for token in payload.split(',') {
            let token = token.trim();
            let value: f64 = token.parse().map_err(|_| TraceError::FieldParse {
                line: lno,
                column: table.schema().column_name(values.len()),
                token: token.to_string(),
            })?;
            values.push(value);
        }

        // The prefix shape is not validated; a timestamp is recovered when
        // present and the row keeps None otherwise.
        let elapsed_seconds = elapsed_re
            .captures(prefix)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        table.push_row(
            Row {
                elapsed_seconds,
                values,
            },
            lno,
        )?;
    }

    Ok(table)
}

/// Split a line at the first marker occurrence into (prefix, payload).
fn split_marker(line: &str) -> Option<(&str, &str)> {
    let at = line.find(DATA_MARKER)?;
    Some((&line[..at], &line[at + DATA_MARKER.len()..]))
}

#[cfg(test)]
mod tests {
    use super::{parse_log_file, parse_log_text};
    use crate::errors::TraceError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
[glfw] renderer initialized
[   0.000000 seconds] DATA: t,particle_id,x_pos,y_pos,x_momenta,y_momenta
[   0.016667 seconds] DATA: 0.016,1,0.5,0.25,-0.1,0.2
[   0.016667 seconds] DATA: 0.016,2,-0.5,0.0,0.1,-0.2
collision pass done
[   0.033333 seconds] DATA: 0.033,1,0.52,0.26,-0.1,0.2
";

    #[test]
    fn header_then_rows_in_file_order() {
        let table = parse_log_text(SAMPLE).unwrap();

        assert_eq!(
            table.schema().columns(),
            ["t", "particle_id", "x_pos", "y_pos", "x_momenta", "y_momenta"]
        );
        assert_eq!(table.row_count(), 3);

        // Row order must be file order, never re-sorted.
        assert_eq!(table.column("particle_id").unwrap(), vec![1.0, 2.0, 1.0]);
        assert_eq!(table.column("x_pos").unwrap(), vec![0.5, -0.5, 0.52]);
    }

    #[test]
    fn parsing_twice_yields_identical_tables() {
        let a = parse_log_text(SAMPLE).unwrap();
        let b = parse_log_text(SAMPLE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn elapsed_timestamp_recovered_from_prefix() {
        let table = parse_log_text(SAMPLE).unwrap();
        assert_eq!(table.rows()[0].elapsed_seconds, Some(0.016667));
        assert_eq!(table.rows()[2].elapsed_seconds, Some(0.033333));
    }

    #[test]
    fn unrecognized_prefix_leaves_timestamp_absent() {
        let text = "\
[   0.0 seconds] DATA: particle_id,x_pos
tick 42 seconds] DATA: 1,0.5
";
        let table = parse_log_text(text).unwrap();
        assert_eq!(table.rows()[0].elapsed_seconds, None);
        assert_eq!(table.rows()[0].values, vec![1.0, 0.5]);
    }

    #[test]
    fn lines_without_marker_are_skipped() {
        let text = "\
no marker here
DATA: 1,2,3 but wrong tag
[   0.0 seconds] DATA: particle_id,x_pos
noise between header and data
[   0.1 seconds] DATA: 7,0.25
";
        let table = parse_log_text(text).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows()[0].values, vec![7.0, 0.25]);
    }

    #[test]
    fn zero_marker_lines_yield_empty_table() {
        let table = parse_log_text("just noise\nmore noise\n").unwrap();
        assert!(table.schema().is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn non_numeric_token_fails_with_line_and_token() {
        let text = "\
[   0.0 seconds] DATA: particle_id,x_pos
[   0.1 seconds] DATA: 1,abc
";
        let err = parse_log_text(text).unwrap_err();
        match err.downcast_ref::<TraceError>() {
            Some(TraceError::FieldParse {
                line,
                column,
                token,
            }) => {
                assert_eq!(*line, 2);
                assert_eq!(column, "x_pos");
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_record_fails_loud_instead_of_misaligning() {
        let text = "\
[   0.0 seconds] DATA: particle_id,x_pos,y_pos
[   0.1 seconds] DATA: 1,0.5
";
        let err = parse_log_text(text).unwrap_err();
        match err.downcast_ref::<TraceError>() {
            Some(TraceError::SchemaMismatch {
                line,
                expected,
                found,
            }) => {
                assert_eq!((*line, *expected, *found), (2, 3, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let err = parse_log_file("/definitely/not/here/debug_output.txt").unwrap_err();
        match err.downcast_ref::<TraceError>() {
            Some(TraceError::FileAccess { path, .. }) => {
                assert_eq!(path, "/definitely/not/here/debug_output.txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = parse_log_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.schema().len(), 6);
    }
}
