use rand::Rng;

use crate::error::{NnError, Result};

/// Row-major weight matrix: one row per node, one column per input.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Fills a new matrix with values drawn uniformly from (-1, 1).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for row in res.data.iter_mut() {
            for value in row.iter_mut() {
                *value = random_weight(rng);
            }
        }

        res
    }

    /// Builds a matrix from rows, all of which must share the first row's width.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        for row in &data {
            NnError::check_len("weight row", cols, row.len())?;
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    /// Iterates over column `j`, i.e. the weight every node applies to input `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(move |row| row[j])
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

/// A single value uniform on (-1, 1), used for weights and biases alike.
pub fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}
