//! Text format for pigmentation profiles
//!
//! ```text
//! x, average, stddev, columns
//! 0,0.61,0.08,10-11-12
//! 0.5,0.42,0.11,13-14-15
//! 1,0.12,0.05,16-17
//! ```
//!
//! One header line, then one line per sample with four comma separated
//! fields. Column indices are joined with `-` and may be empty. Floats are
//! written in their shortest round-trip form, so reading a written profile
//! gives back identical values.

use crate::error::{FormatError, Result};
use crate::quantify::{one_dimension_histogram, PigmentationSample};

pub const HEADER: &str = "x, average, stddev, columns";

/// Serialize samples with the header line.
pub fn to_csv(samples: &[PigmentationSample]) -> String {
    let rows = samples.iter().map(|sample| {
        let columns = sample
            .columns()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join("-");
        format!(
            "{},{},{},{}",
            sample.x(),
            sample.average(),
            sample.std_dev(),
            columns
        )
    });
    std::iter::once(HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The [`one_dimension_histogram`] of `samples`, one value per line with six decimals.
pub fn one_dimension_csv(samples: &[PigmentationSample]) -> String {
    one_dimension_histogram(samples)
        .iter()
        .map(|x| format!("{x:.6}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a profile written by [`to_csv`].
///
/// Blank lines are ignored. Row indices in errors count data rows from 0,
/// not including the header.
pub fn parse(contents: &str) -> Result<Vec<PigmentationSample>> {
    let lines: Vec<&str> = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() <= 1 {
        return Err(FormatError::RowCount(lines.len()).into());
    }
    if lines[0].trim() != HEADER {
        return Err(FormatError::Header {
            found: lines[0].to_string(),
            expected: HEADER,
        }
        .into());
    }

    lines[1..]
        .iter()
        .enumerate()
        .map(|(row, line)| parse_row(row, line).map_err(Into::into))
        .collect()
}

fn parse_row(row: usize, line: &str) -> Result<PigmentationSample, FormatError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[x, average, std_dev, columns] = fields.as_slice() else {
        return Err(FormatError::Row {
            row,
            content: line.to_string(),
        });
    };

    let invalid = |value: &str| FormatError::Value {
        row,
        content: line.to_string(),
        value: value.to_string(),
    };
    let float = |value: &str| value.parse::<f64>().map_err(|_| invalid(value));

    let columns = if columns.is_empty() {
        Vec::new()
    } else {
        columns
            .split('-')
            .map(|c| c.parse::<usize>().map_err(|_| invalid(c)))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(PigmentationSample::new(
        float(x)?,
        float(average)?,
        float(std_dev)?,
        columns,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn profile() -> Vec<PigmentationSample> {
        vec![
            PigmentationSample::new(0.0, 0.61, 0.08, vec![10, 11, 12]),
            PigmentationSample::new(0.5, 0.1 + 0.2, 0.11, vec![13]),
            PigmentationSample::new(1.0, 0.0, 0.0, vec![]),
        ]
    }

    fn format_error(contents: &str) -> FormatError {
        match parse(contents) {
            Err(Error::Format(err)) => err,
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn test_layout() {
        assert_eq!(
            to_csv(&profile()),
            "x, average, stddev, columns\n\
             0,0.61,0.08,10-11-12\n\
             0.5,0.30000000000000004,0.11,13\n\
             1,0,0,"
        );
    }

    #[test]
    fn test_empty_profile_is_header_only() {
        assert_eq!(to_csv(&[]), HEADER);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let samples = profile();
        assert_eq!(parse(&to_csv(&samples)).unwrap(), samples);
    }

    #[test]
    fn test_trailing_newline_and_crlf() {
        let contents = "x, average, stddev, columns\r\n0,0.5,0.1,1-2\r\n\r\n";
        let samples = parse(contents).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].columns(), &[1, 2]);
    }

    #[test]
    fn test_header_only() {
        assert_eq!(format_error(HEADER), FormatError::RowCount(1));
        assert_eq!(format_error(""), FormatError::RowCount(0));
    }

    #[test]
    fn test_wrong_header() {
        assert!(matches!(
            format_error("x,average,stddev,columns\n0,0,0,"),
            FormatError::Header { .. }
        ));
    }

    #[test]
    fn test_missing_field_names_row() {
        let contents = "x, average, stddev, columns\n0,0.5,0.1,1\n0.5,0.2";
        assert_eq!(
            format_error(contents),
            FormatError::Row {
                row: 1,
                content: "0.5,0.2".into()
            }
        );
    }

    #[test]
    fn test_bad_float() {
        let contents = "x, average, stddev, columns\n0,abc,0.1,1";
        assert_eq!(
            format_error(contents),
            FormatError::Value {
                row: 0,
                content: "0,abc,0.1,1".into(),
                value: "abc".into()
            }
        );
    }

    #[test]
    fn test_bad_column_index() {
        let contents = "x, average, stddev, columns\n0,0.5,0.1,1--2";
        assert!(matches!(
            format_error(contents),
            FormatError::Value { row: 0, .. }
        ));
    }

    #[test]
    fn test_one_dimension_csv() {
        let samples = vec![
            PigmentationSample::new(0.0, 0.25, 0.0, vec![0]),
            PigmentationSample::new(1.0, 0.1, 0.0, vec![1]),
        ];
        assert_eq!(one_dimension_csv(&samples), "0.000000\n0.000000\n1.000000");
    }
}
