use crate::domain::errors::FrameError;
use crate::domain::market::{PriceSeries, PriceTable};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Merges per-pair series into one table over the union of their dates.
///
/// Each column is forward-filled from its last observation. Dates before a
/// pair's first observation stay `None`.
pub fn align(series: &[PriceSeries]) -> Result<PriceTable, FrameError> {
    let index: Vec<NaiveDate> = series
        .iter()
        .flat_map(|s| s.points().iter().map(|p| p.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut table = PriceTable::new(index);

    for s in series {
        let by_date: HashMap<NaiveDate, f64> = s.points().iter().map(|p| (p.date, p.close)).collect();

        let mut last = None;
        let column: Vec<Option<f64>> = table
            .index()
            .iter()
            .map(|date| {
                if let Some(close) = by_date.get(date) {
                    last = Some(*close);
                }
                last
            })
            .collect();

        table.insert_column(s.pair.clone(), column)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::PricePoint;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn test_union_index_and_forward_fill() {
        let a = PriceSeries::new(
            "A",
            vec![
                PricePoint::new(day(1), 1.0),
                PricePoint::new(day(2), 2.0),
                PricePoint::new(day(5), 5.0),
            ],
        );
        let b = PriceSeries::new(
            "B",
            vec![PricePoint::new(day(2), 20.0), PricePoint::new(day(3), 30.0)],
        );

        let table = align(&[a, b]).unwrap();

        assert_eq!(table.index(), &[day(1), day(2), day(3), day(5)]);
        assert_eq!(table.columns(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.column("A").unwrap(), &[Some(1.0), Some(2.0), Some(2.0), Some(5.0)]);
        // Leading gap is not back-filled, trailing gap is forward-filled
        assert_eq!(table.column("B").unwrap(), &[None, Some(20.0), Some(30.0), Some(30.0)]);
    }

    #[test]
    fn test_no_series_gives_empty_table() {
        let table = align(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
