use std::fmt;

/// Moving-average crossover decision for one pair on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    /// Short MA strictly above long MA (+1)
    Buy,
    /// Short MA at or below long MA (-1)
    Sell,
    /// Either MA undefined (0)
    #[default]
    Hold,
}

impl Signal {
    /// Classifies one date from its short and long moving averages.
    pub fn from_moving_averages(short: Option<f64>, long: Option<f64>) -> Self {
        match (short, long) {
            (Some(short), Some(long)) if short > long => Signal::Buy,
            (Some(_), Some(_)) => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    /// Numeric code used in exported signal tables.
    pub fn code(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
