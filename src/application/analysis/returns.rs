use crate::domain::errors::FrameError;
use crate::domain::market::{PriceTable, ReturnTable};
use crate::domain::performance::Stats;

/// Daily percentage change of each pair.
///
/// The result drops the first date of `prices`, so every column has exactly
/// one entry fewer than its price column. A return is `None` when either
/// price is missing.
pub fn daily_returns(prices: &PriceTable, pairs: &[String]) -> Result<ReturnTable, FrameError> {
    let index = prices.index().get(1..).unwrap_or(&[]).to_vec();
    let mut returns = ReturnTable::new(index);

    for pair in pairs {
        let Some(column) = prices.column(pair) else {
            continue;
        };
        let values = column
            .windows(2)
            .map(|w| match (w[0], w[1]) {
                (Some(prev), Some(curr)) => Stats::pct_change(prev, curr),
                _ => None,
            })
            .collect();
        returns.insert_column(pair.clone(), values)?;
    }

    Ok(returns)
}

/// The defined values of one return column.
pub fn defined_values(column: &[Option<f64>]) -> Vec<f64> {
    column.iter().filter_map(|v| *v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn table(pair: &str, values: Vec<Option<f64>>) -> PriceTable {
        let index = (0..values.len() as u32)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d + 1).unwrap())
            .collect();
        let mut t = PriceTable::new(index);
        t.insert_column(pair, values).unwrap();
        t
    }

    #[test]
    fn test_returns_drop_first_row() {
        let prices = table("USDINR=X", vec![Some(100.0), Some(102.0), Some(101.0)]);
        let returns = daily_returns(&prices, &["USDINR=X".to_string()]).unwrap();

        assert_eq!(returns.len(), prices.len() - 1);
        assert_eq!(returns.index()[0], prices.index()[1]);

        let rounded: Vec<_> = returns
            .column("USDINR=X")
            .unwrap()
            .iter()
            .map(|r| Stats::round_dp(r.unwrap(), 4).unwrap())
            .collect();
        assert_eq!(rounded, vec![dec!(2.0), dec!(-0.9804)]);
    }

    #[test]
    fn test_leading_gap_gives_undefined_return() {
        let prices = table("X", vec![None, Some(1.0), Some(1.5)]);
        let returns = daily_returns(&prices, &["X".to_string()]).unwrap();
        let column = returns.column("X").unwrap();

        assert_eq!(column[0], None);
        assert!((column[1].unwrap() - 50.0).abs() < 1e-12);
        assert_eq!(defined_values(column).len(), 1);
    }

    #[test]
    fn test_empty_price_table() {
        let prices = PriceTable::new(Vec::new());
        let returns = daily_returns(&prices, &[]).unwrap();
        assert!(returns.is_empty());
    }
}
