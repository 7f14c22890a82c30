//! Parse comma-separated text into a field-keyed table, then into raw points

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::errors::{InputError, SourceContext};
use crate::log;
use crate::types::{Datum, Point, RawPoint};
use crate::{CsvParser, Rule};

/// Name of the column holding horizontal coordinates
pub const X_COLUMN: &str = "x";
/// Name of the column holding vertical coordinates
pub const Y_COLUMN: &str = "y";

/// One cell of the table, with its location in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub text: String,
    pub span: SourceSpan,
}

/// One data row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub fields: Vec<Field>,
    /// Span of the whole row, used to point at missing trailing fields
    pub span: SourceSpan,
}

/// A parsed table: header plus data rows
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Record,
    pub records: Vec<Record>,
    src: SourceContext,
}

/// Parse table text.
///
/// The first non-blank row is the header. Blank rows are skipped.
pub fn parse_table(src: &SourceContext) -> Result<Table, InputError> {
    let pairs = CsvParser::parse(Rule::table, &src.source).map_err(|e| {
        let span = match e.location {
            InputLocation::Pos(pos) => SourceSpan::from((pos, 0)),
            InputLocation::Span((start, end)) => SourceSpan::from((start, end - start)),
        };
        InputError::Syntax {
            message: e.variant.message().to_string(),
            src: src.named_source(),
            span,
        }
    })?;

    let mut rows = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::table {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::record {
                    let record = parse_record(inner);
                    if !record.is_blank() {
                        rows.push(record);
                    }
                }
            }
        }
    }

    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(InputError::NoPoints)?;
    let records: Vec<Record> = rows.collect();

    log::debug!(
        columns = header.fields.len(),
        rows = records.len(),
        "parsed table"
    );

    Ok(Table {
        header,
        records,
        src: src.clone(),
    })
}

fn parse_record(pair: Pair<Rule>) -> Record {
    let span = pair.as_span();
    let fields = pair
        .into_inner()
        .filter(|inner| inner.as_rule() == Rule::field)
        .map(parse_field)
        .collect();
    Record {
        fields,
        span: SourceSpan::from((span.start(), span.end() - span.start())),
    }
}

fn parse_field(pair: Pair<Rule>) -> Field {
    let span = pair.as_span();
    let span = SourceSpan::from((span.start(), span.end() - span.start()));
    let text = match pair.into_inner().next() {
        Some(inner) if inner.as_rule() == Rule::quoted => inner
            .into_inner()
            .next()
            .map(|q| q.as_str().replace("\"\"", "\""))
            .unwrap_or_default(),
        Some(inner) => inner.as_str().to_string(),
        None => String::new(),
    };
    Field { text, span }
}

impl Record {
    /// A blank line parses as a single empty field
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].text.is_empty() && self.span.len() == 0
    }

    /// Zero-width span at the end of the row
    fn end_span(&self) -> SourceSpan {
        SourceSpan::from((self.span.offset() + self.span.len(), 0))
    }
}

impl Table {
    /// Column names, in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.header.fields.iter().map(|f| f.text.trim())
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().position(|c| c == name)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field-keyed access: the text of `column` on data row `row`.
    ///
    /// A row shorter than the header has no value for its trailing columns.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.records
            .get(row)?
            .fields
            .get(idx)
            .map(|f| f.text.as_str())
    }

    /// Extract the `x`/`y` columns as data-space points.
    pub fn points(&self) -> Result<Vec<RawPoint>, InputError> {
        let x_idx = self.require_column(X_COLUMN)?;
        let y_idx = self.require_column(Y_COLUMN)?;

        if self.records.is_empty() {
            return Err(InputError::NoPoints);
        }

        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let x = self.coordinate(record, row + 1, X_COLUMN, x_idx)?;
                let y = self.coordinate(record, row + 1, Y_COLUMN, y_idx)?;
                Ok(Point::new(x, y))
            })
            .collect()
    }

    fn require_column(&self, column: &'static str) -> Result<usize, InputError> {
        self.column_index(column)
            .ok_or_else(|| InputError::MissingColumn {
                column,
                src: self.src.named_source(),
                span: self.header.span,
            })
    }

    fn coordinate(
        &self,
        record: &Record,
        row: usize,
        column: &'static str,
        idx: usize,
    ) -> Result<Datum, InputError> {
        let (text, span) = match record.fields.get(idx) {
            Some(field) => (field.text.as_str(), field.span),
            None => ("", record.end_span()),
        };
        Datum::try_new(text).map_err(|reason| InputError::NotNumeric {
            column,
            row,
            reason,
            src: self.src.named_source(),
            span,
        })
    }
}

/// Parse table text straight to points
pub fn parse_points(src: &SourceContext) -> Result<Vec<RawPoint>, InputError> {
    parse_table(src)?.points()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    fn ctx(source: &str) -> SourceContext {
        SourceContext::new("<input>", source)
    }

    #[test]
    fn parses_header_and_rows() {
        let table = parse_table(&ctx("x,y\n0,0\n10,0\n")).unwrap();
        assert_eq!(table.columns().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert_eq!(table.get(1, "x"), Some("10"));
        assert_eq!(table.get(1, "y"), Some("0"));
        assert_eq!(table.get(2, "x"), None);
    }

    #[test]
    fn accepts_crlf_and_blank_lines() {
        let table = parse_table(&ctx("x,y\r\n1,2\r\n\r\n3,4\r\n")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "y"), Some("4"));
    }

    #[test]
    fn unquotes_fields() {
        let table = parse_table(&ctx("name,x,y\n\"a, \"\"b\"\"\",1,2\n")).unwrap();
        assert_eq!(table.get(0, "name"), Some("a, \"b\""));
        assert_eq!(table.get(0, "x"), Some("1"));
    }

    #[test]
    fn columns_can_be_in_any_order() {
        let points = parse_points(&ctx("label,y,x\nA,7,3\n")).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x.value, 3.0);
        assert_eq!(points[0].y.value, 7.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = parse_points(&ctx("x,z\n1,2\n")).unwrap_err();
        assert!(matches!(err, InputError::MissingColumn { column: "y", .. }));
    }

    #[test]
    fn non_numeric_coordinate_is_reported_with_row() {
        let err = parse_points(&ctx("x,y\n1,2\n3,four\n")).unwrap_err();
        match err {
            InputError::NotNumeric {
                column, row, reason, span, ..
            } => {
                assert_eq!(column, "y");
                assert_eq!(row, 2);
                assert_eq!(reason, NumericError::NotANumber);
                assert_eq!(span.offset(), 10);
                assert_eq!(span.len(), 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_row_is_missing_a_coordinate() {
        let err = parse_points(&ctx("x,y\n1\n")).unwrap_err();
        assert!(matches!(
            err,
            InputError::NotNumeric {
                column: "y",
                reason: NumericError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn header_only_has_no_points() {
        assert!(matches!(
            parse_points(&ctx("x,y\n")).unwrap_err(),
            InputError::NoPoints
        ));
        assert!(matches!(
            parse_points(&ctx("")).unwrap_err(),
            InputError::NoPoints
        ));
    }

    #[test]
    fn stray_quote_is_a_syntax_error() {
        let err = parse_points(&ctx("x,y\n1,2\"\n")).unwrap_err();
        assert!(matches!(err, InputError::Syntax { .. }));
    }
}
