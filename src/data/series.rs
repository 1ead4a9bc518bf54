/// Synthetic "abstract time series" for the recurrent demos: a pulse moves
/// cyclically across 4 channels, one step per timestep, and the expected
/// output at t is the input at t+1. Row order is semantically significant —
/// each row is one timestep.
///
/// The dataset is deterministic so that seeded runs are reproducible.
pub fn abstract_series() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    const CHANNELS: usize = 4;
    const STEPS: usize = 16;

    let mut inputs = Vec::with_capacity(STEPS);
    let mut expected = Vec::with_capacity(STEPS);
    for t in 0..STEPS {
        inputs.push(one_hot(t % CHANNELS, CHANNELS));
        expected.push(one_hot((t + 1) % CHANNELS, CHANNELS));
    }
    (inputs, expected)
}

fn one_hot(idx: usize, len: usize) -> Vec<f64> {
    let mut v = vec![0.0; len];
    v[idx] = 1.0;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_is_next_timestep_input() {
        let (inputs, expected) = abstract_series();
        assert_eq!(inputs.len(), expected.len());
        for t in 0..inputs.len() - 1 {
            assert_eq!(expected[t], inputs[t + 1]);
        }
    }

    #[test]
    fn rows_are_one_hot() {
        let (inputs, _) = abstract_series();
        for row in &inputs {
            assert_eq!(row.iter().sum::<f64>(), 1.0);
            assert!(row.iter().all(|&x| x == 0.0 || x == 1.0));
        }
    }
}
