//! CSV dataset parsing.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it
//!   contains any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded commas are handled correctly
//!
//! Label modes:
//! - `ClassIndex` — the last column is an integer class index (0-based),
//!   one-hot-encoded into a vector of length `n_classes`.
//! - `OneHot`     — the last `n_label_cols` columns are floats forming the
//!   label vector (raw targets for non-classification runs).

use crate::error::{NetError, NetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// Last column is an integer class index; one-hot encode to `n_classes`.
    ClassIndex { n_classes: usize },
    /// Last `n_label_cols` columns are the label vector.
    OneHot { n_label_cols: usize },
}

/// Parses CSV text into `(inputs, labels)`, two row-aligned matrices.
pub fn parse_csv(text: &str, label_mode: LabelMode) -> NetResult<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let mut lines = text.lines().peekable();

    // Auto-detect header: skip first line if any cell is non-numeric.
    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut inputs: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<Vec<f64>> = Vec::new();

    for (row_idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if cells.is_empty() {
            continue;
        }

        match label_mode {
            LabelMode::ClassIndex { n_classes } => {
                if cells.len() < 2 {
                    return Err(NetError::Csv {
                        line: row_idx + 1,
                        msg: format!(
                            "expected at least 2 columns (features + class index), got {}",
                            cells.len()
                        ),
                    });
                }
                let feature_cells = &cells[..cells.len() - 1];
                let label_cell = cells.last().unwrap();

                let feats = parse_floats(feature_cells, row_idx + 1)?;
                let class_idx: usize =
                    label_cell.trim().parse::<usize>().map_err(|_| NetError::Csv {
                        line: row_idx + 1,
                        msg: format!("class index '{label_cell}' is not a non-negative integer"),
                    })?;
                if class_idx >= n_classes {
                    return Err(NetError::Csv {
                        line: row_idx + 1,
                        msg: format!("class index {class_idx} >= n_classes {n_classes}"),
                    });
                }
                let mut one_hot = vec![0.0f64; n_classes];
                one_hot[class_idx] = 1.0;

                inputs.push(feats);
                labels.push(one_hot);
            }
            LabelMode::OneHot { n_label_cols } => {
                if cells.len() < n_label_cols + 1 {
                    return Err(NetError::Csv {
                        line: row_idx + 1,
                        msg: format!(
                            "expected at least {} columns, got {}",
                            n_label_cols + 1,
                            cells.len()
                        ),
                    });
                }
                let split = cells.len() - n_label_cols;
                let feats = parse_floats(&cells[..split], row_idx + 1)?;
                let lbls = parse_floats(&cells[split..], row_idx + 1)?;

                inputs.push(feats);
                labels.push(lbls);
            }
        }
    }

    if inputs.is_empty() {
        return Err(NetError::Csv {
            line: 0,
            msg: "CSV contains no data rows after parsing".into(),
        });
    }

    // Verify all rows have the same feature width.
    let n_feats = inputs[0].len();
    for (i, row) in inputs.iter().enumerate() {
        if row.len() != n_feats {
            return Err(NetError::Csv {
                line: i + 1,
                msg: format!(
                    "feature count {} does not match first row's {}",
                    row.len(),
                    n_feats
                ),
            });
        }
    }

    Ok((inputs, labels))
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    let cells = parse_csv_row(line);
    cells.iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                if in_quotes && i + 1 < chars.len() && chars[i + 1] == '"' {
                    // Escaped quote inside quoted field.
                    current.push('"');
                    i += 2;
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            c => current.push(c),
        }
        i += 1;
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row_num: usize) -> NetResult<Vec<f64>> {
    cells
        .iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| NetError::Csv {
                line: row_num,
                msg: format!("'{c}' is not a valid number"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_rows_are_one_hot_encoded() {
        let text = "a,b,label\n1.0,2.0,0\n3.0,4.0,2\n";
        let (inputs, labels) = parse_csv(text, LabelMode::ClassIndex { n_classes: 3 }).unwrap();
        assert_eq!(inputs, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(labels, vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]);
    }

    #[test]
    fn one_hot_mode_splits_label_columns() {
        let text = "1,2,0,1\n3,4,1,0\n";
        let (inputs, labels) = parse_csv(text, LabelMode::OneHot { n_label_cols: 2 }).unwrap();
        assert_eq!(inputs, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(labels, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn quoted_fields_and_blank_lines_are_handled() {
        let text = "\"1.5\",2.0,1\n\n2.5,3.0,0\n";
        let (inputs, _) = parse_csv(text, LabelMode::ClassIndex { n_classes: 2 }).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0][0], 1.5);
    }

    #[test]
    fn out_of_range_class_index_is_rejected() {
        let text = "1,2,5\n";
        let err = parse_csv(text, LabelMode::ClassIndex { n_classes: 3 }).unwrap_err();
        assert!(matches!(err, NetError::Csv { line: 1, .. }));
    }
}
