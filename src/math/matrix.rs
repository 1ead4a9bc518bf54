use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::Sub;

/// A dense 2-D matrix of `f64` mapping one layer's activation vector to the
/// next layer's pre-activation sums. Dimensions are fixed at construction;
/// only the values mutate during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
    }

    /// Glorot (Glorot & Bengio, 2010) initialization: every entry drawn
    /// uniformly from `[-sqrt(1/fan_in), sqrt(1/fan_in)]`.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input
    /// connections), so the bound is derived from it. The caller supplies
    /// the RNG, which makes seeded construction reproducible.
    pub fn glorot<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let bound = (1.0 / cols as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 * bound - bound;
            }
        }
        res
    }

    /// Returns a transposed copy, never a view.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            (self.data)
                .clone()
                .into_iter()
                .map(|row| row.into_iter().map(|x| functor(x)).collect())
                .collect(),
        )
    }

    /// Matrix-vector product. The weighted sum every neuron of the
    /// destination layer receives from `v`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        if self.cols != v.len() {
            panic!("Matrix and vector are of incorrect sizes")
        }

        self.data
            .iter()
            .map(|row| row.iter().zip(v.iter()).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Outer product of two vectors: `outer(u, v)[i][j] == u[i] * v[j]`,
    /// shape `(u.len(), v.len())`. This is how a weight gradient is built
    /// from a layer error and the activation feeding that layer.
    pub fn outer(u: &[f64], v: &[f64]) -> Matrix {
        let mut res = Matrix::zeros(u.len(), v.len());

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = u[i] * v[j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn glorot_entries_stay_within_fan_in_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = (1.0 / 4.0f64).sqrt();
        // Two distinct calls with the same fan-in must both respect the bound.
        for _ in 0..2 {
            let m = Matrix::glorot(6, 4, &mut rng);
            for row in &m.data {
                for &w in row {
                    assert!(w >= -bound && w <= bound, "entry {w} outside ±{bound}");
                }
            }
        }
    }

    #[test]
    fn outer_has_expected_shape_and_entries() {
        let u = [1.0, 2.0];
        let v = [3.0, 4.0, 5.0];
        let m = Matrix::outer(&u, &v);
        assert_eq!((m.rows, m.cols), (2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m.data[i][j], u[i] * v[j]);
            }
        }
    }

    #[test]
    fn transpose_returns_a_copy() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let t = m.transpose();
        assert_eq!(t.data, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
        // Source matrix is untouched.
        assert_eq!(m.data, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn mul_vec_computes_weighted_sums() {
        let m = Matrix::from_data(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, -1.0]]);
        assert_eq!(m.mul_vec(&[1.0, 2.0, 3.0]), vec![7.0, -1.0]);
    }

    #[test]
    #[should_panic]
    fn mul_vec_panics_on_shape_bug() {
        Matrix::zeros(2, 3).mul_vec(&[1.0, 2.0]);
    }
}
