use chrono::NaiveDate;

/// One daily closing observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closing prices of one currency pair, ascending by date with at most
/// one observation per day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub pair: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from raw provider points.
    ///
    /// Points are sorted by date, non-finite closes are discarded and when a
    /// day appears more than once the last observation wins.
    pub fn new(pair: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            pair: pair.into(),
            points: deduped,
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
