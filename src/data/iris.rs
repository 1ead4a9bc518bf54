use crate::data::csv::{parse_csv, LabelMode};

/// The classic 150-row Iris table: 4 real features per sample, 3 classes.
const IRIS_CSV: &str = include_str!("iris.csv");

/// Returns the Iris dataset as `(inputs, one_hot_labels)` — 150 rows of
/// 4 raw (un-normalized) features and a one-hot 3-class label each.
pub fn iris() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    // The embedded table is well-formed, so parsing cannot fail.
    parse_csv(IRIS_CSV, LabelMode::ClassIndex { n_classes: 3 })
        .expect("embedded iris.csv is well-formed")
}
