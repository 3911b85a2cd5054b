/// Square matrix of pairwise return correlations, rows and columns in pair order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pairs: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Builds the matrix from its upper triangle; `upper(i, j)` is only asked
    /// for `i < j`. The lower triangle mirrors it and the diagonal is 1.0 for
    /// every pair in `defined_diagonal`.
    pub fn from_upper_triangle<F>(pairs: Vec<String>, defined_diagonal: &[bool], mut upper: F) -> Self
    where
        F: FnMut(usize, usize) -> Option<f64>,
    {
        let n = pairs.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            values[i][i] = defined_diagonal.get(i).copied().unwrap_or(false).then_some(1.0);
            for j in (i + 1)..n {
                let r = upper(i, j);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { pairs, values }
    }

    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn get_by_pair(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.pairs.iter().position(|p| p == row)?;
        let j = self.pairs.iter().position(|p| p == col)?;
        self.get(i, j)
    }

    pub fn row(&self, row: usize) -> &[Option<f64>] {
        self.values.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| (0..self.len()).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
