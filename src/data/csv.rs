//! Iris CSV loading.
//!
//! Expected format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell in a feature column)
//! - Four numeric feature columns followed by the species name
//! - Double-quoted fields with embedded commas are handled

use std::path::Path;

use crate::data::iris::{Dataset, Species, IRIS_FEATURES, IRIS_SAMPLES};
use crate::error::{DatasetError, ParseSpeciesError};

/// Reads the Iris CSV at `path`. Exactly `IRIS_SAMPLES` data rows are required.
pub fn load_iris<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_iris(&text, IRIS_SAMPLES)
}

/// Parses Iris CSV text, requiring exactly `expected_rows` data rows.
///
/// Stops at the first malformed row; nothing is returned on failure.
pub fn parse_iris(text: &str, expected_rows: usize) -> Result<Dataset, DatasetError> {
    let mut lines = text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut inputs: Vec<Vec<f64>> = Vec::with_capacity(expected_rows);
    let mut labels: Vec<Vec<f64>> = Vec::with_capacity(expected_rows);

    for (line_idx, line) in lines {
        let row = line_idx + 1;
        let cells = parse_csv_row(line.trim());
        if cells.len() != IRIS_FEATURES + 1 {
            return Err(DatasetError::ColumnCount {
                row,
                expected: IRIS_FEATURES + 1,
                found: cells.len(),
            });
        }

        let feats = parse_floats(&cells[..IRIS_FEATURES], row)?;
        let label = cells[IRIS_FEATURES].trim();
        let species: Species = label.parse()
            .map_err(|ParseSpeciesError(label)| DatasetError::UnknownSpecies { row, label })?;

        inputs.push(feats);
        labels.push(species.one_hot());
    }

    if inputs.len() != expected_rows {
        return Err(DatasetError::RowCount { expected: expected_rows, found: inputs.len() });
    }

    Ok(Dataset::new(inputs, labels))
}

/// Returns `true` if any feature cell of the row is non-numeric.
fn is_header(line: &str) -> bool {
    parse_csv_row(line).iter().take(IRIS_FEATURES).any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row: usize) -> Result<Vec<f64>, DatasetError> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
                row,
                value: c.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "sepal_length,sepal_width,petal_length,petal_width,species";

    fn csv_with(rows: usize, last_label: &str) -> String {
        let mut text = String::from(HEADER);
        text.push('\n');
        for i in 0..rows {
            let label = if i + 1 == rows { last_label } else { Species::ALL[i % 3].name() };
            text.push_str(&format!("5.{},3.{},1.{},0.{},{}\n", i % 10, i % 7, i % 5, i % 3, label));
        }
        text
    }

    #[test]
    fn labels_are_one_hot() {
        let data = parse_iris(&csv_with(IRIS_SAMPLES, "Iris-virginica"), IRIS_SAMPLES).unwrap();
        assert_eq!(data.len(), IRIS_SAMPLES);
        for label in data.labels() {
            assert_eq!(label.iter().filter(|&&x| x == 1.0).count(), 1);
            assert_eq!(label.iter().filter(|&&x| x == 0.0).count(), 2);
        }
        assert_eq!(data.inputs()[3], vec![5.3, 3.3, 1.3, 0.0]);
    }

    #[test]
    fn unknown_species_fails_with_its_row() {
        let err = parse_iris(&csv_with(IRIS_SAMPLES, "Iris-unknown"), IRIS_SAMPLES).unwrap_err();
        match err {
            DatasetError::UnknownSpecies { row, label } => {
                assert_eq!(row, IRIS_SAMPLES + 1);
                assert_eq!(label, "Iris-unknown");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn row_count_is_enforced() {
        let err = parse_iris(&csv_with(149, "Iris-setosa"), IRIS_SAMPLES).unwrap_err();
        assert!(matches!(err, DatasetError::RowCount { expected: 150, found: 149 }));
        assert!(matches!(
            parse_iris("", IRIS_SAMPLES),
            Err(DatasetError::RowCount { found: 0, .. })
        ));
    }

    #[test]
    fn bad_number_and_width_are_reported() {
        let text = format!("{HEADER}\n5.1,abc,1.4,0.2,Iris-setosa\n");
        assert!(matches!(parse_iris(&text, 1), Err(DatasetError::InvalidNumber { row: 2, .. })));

        let text = format!("{HEADER}\n5.1,3.5,1.4,Iris-setosa\n");
        assert!(matches!(
            parse_iris(&text, 1),
            Err(DatasetError::ColumnCount { row: 2, expected: 5, found: 4 })
        ));
    }

    #[test]
    fn headerless_and_quoted_rows_parse() {
        let data = parse_iris("4.9,3.0,1.4,0.2,\"Iris-setosa\"\n", 1).unwrap();
        assert_eq!(data.labels()[0], Species::Setosa.one_hot());
        assert_eq!(parse_csv_row("a,\"b,c\",\"d\"\"e\""), vec!["a", "b,c", "d\"e"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_iris("/definitely/not/here/iris.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
