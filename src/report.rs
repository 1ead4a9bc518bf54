//! Console reporting helpers for time-series predictions.

/// Prints a labeled series row where every component equal to `val` is
/// substituted with `sub` — zero components render as "." so the moving
/// pattern stays visible.
pub fn print_row_strip_sub(label: &str, v: &[f64], val: f64, sub: &str) {
    print!("{label}: ");
    for &x in v {
        if x == val {
            print!("{sub}\t");
        } else {
            print!("{x:.1}\t");
        }
    }
}

/// Prints an Input / Expected / Predicted comparison line for one timestep.
pub fn print_prediction_line(input: &[f64], expected: &[f64], predicted: &[f64]) {
    print_row_strip_sub("Input", input, 0.0, ".");
    print_row_strip_sub("Expected", expected, 0.0, ".");
    print_row_strip_sub("Predicted", predicted, 0.0, ".");
    println!();
}
