use crate::domain::market::ReturnTable;
use crate::domain::performance::{CorrelationMatrix, Stats};

/// Pearson correlation of daily returns between every two pairs.
///
/// Each entry uses the dates on which both pairs have a return. A pair with
/// constant returns has no defined correlation, including with itself.
pub fn correlation_matrix(returns: &ReturnTable, pairs: &[String]) -> CorrelationMatrix {
    let pairs: Vec<String> = pairs
        .iter()
        .filter(|pair| returns.contains_column(pair))
        .cloned()
        .collect();
    let columns: Vec<&[Option<f64>]> = pairs
        .iter()
        .filter_map(|pair| returns.column(pair))
        .collect();

    let defined_diagonal: Vec<bool> = columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = column.iter().filter_map(|v| *v).collect();
            Stats::std_dev(&values).is_some_and(|s| s > 0.0)
        })
        .collect();

    CorrelationMatrix::from_upper_triangle(pairs, &defined_diagonal, |i, j| {
        let (x, y): (Vec<f64>, Vec<f64>) = columns[i]
            .iter()
            .zip(columns[j].iter())
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip();
        Stats::pearson(&x, &y)
    })
}
