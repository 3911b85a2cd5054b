use crate::config::ProviderEnvConfig;
use crate::domain::errors::FetchError;
use crate::domain::market::{PricePoint, PriceSeries};
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

// ===== Chart API payload =====

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ===== Provider =====

/// Daily closes from the Yahoo Finance v8 chart endpoint.
pub struct YahooFinanceProvider {
    client: Client,
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new(config: &ProviderEnvConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config),
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/v8/finance/chart/{pair}` with the pair percent-encoded as a
    /// single path segment.
    fn chart_url(&self, pair: &str) -> Result<Url, FetchError> {
        let invalid = |reason: String| FetchError::InvalidRequest {
            pair: pair.to_string(),
            reason,
        };

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("invalid provider URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("provider URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", pair]);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    async fn fetch_daily_closes(
        &self,
        pair: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        let url = self.chart_url(pair)?;
        let (period1, period2) = period_bounds(start, end);

        debug!(
            "YahooFinanceProvider: GET {} for {} ({} -> {})",
            url, pair, start, end
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Http {
                pair: pair.to_string(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Http {
            pair: pair.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            warn!(
                "YahooFinanceProvider: API error {} for {}: {}",
                status,
                pair,
                body.chars().take(200).collect::<String>()
            );
        }

        parse_chart_response(pair, status.as_u16(), &body, start, end)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}

/// Unix-second bounds covering `start..=end` in UTC. The upper bound is the
/// start of the day after `end` because the endpoint treats it as exclusive.
fn period_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let midnight = |date: NaiveDate| date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    let after_end = end.checked_add_days(Days::new(1)).unwrap_or(end);
    (midnight(start), midnight(after_end))
}

/// Turns a chart payload into a price series.
///
/// Provider-reported errors take precedence over the HTTP status so that an
/// unknown symbol is reported with the provider's own description. Timestamps
/// are shifted by the exchange offset before taking the calendar date, null
/// closes are dropped and only days inside `start..=end` are kept.
pub(crate) fn parse_chart_response(
    pair: &str,
    status: u16,
    body: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, FetchError> {
    let parsed = serde_json::from_str::<ChartResponse>(body);

    if let Ok(ChartResponse {
        chart: ChartBody {
            error: Some(err), ..
        },
    }) = &parsed
    {
        return Err(FetchError::Provider {
            pair: pair.to_string(),
            code: err.code.clone(),
            description: err.description.clone(),
        });
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            pair: pair.to_string(),
            status,
        });
    }

    let response = parsed.map_err(|e| FetchError::Decode {
        pair: pair.to_string(),
        reason: e.to_string(),
    })?;

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(FetchError::EmptySeries {
            pair: pair.to_string(),
            start,
            end,
        });
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    if closes.len() != result.timestamp.len() {
        return Err(FetchError::Decode {
            pair: pair.to_string(),
            reason: format!(
                "{} timestamps but {} closing prices",
                result.timestamp.len(),
                closes.len()
            ),
        });
    }

    let offset = result.meta.gmtoffset;
    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let date = DateTime::from_timestamp(ts.checked_add(offset)?, 0)?.date_naive();
            let close = close?;
            (start <= date && date <= end).then(|| PricePoint::new(date, close))
        })
        .collect();

    Ok(PriceSeries::new(pair, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-02, 2024-01-03, 2024-01-04 at 00:00 UTC
    const BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "currency": "USD", "symbol": "EURUSD=X", "gmtoffset": 0 },
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{ "open": [1.10, 1.09, 1.09], "close": [1.1038, null, 1.0945] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response_skips_null_closes() {
        let series =
            parse_chart_response("EURUSD=X", 200, BODY, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(series.pair, "EURUSD=X");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0], PricePoint::new(date(2024, 1, 2), 1.1038));
        assert_eq!(series.points()[1], PricePoint::new(date(2024, 1, 4), 1.0945));
    }

    #[test]
    fn test_parse_chart_response_filters_to_range() {
        let series =
            parse_chart_response("EURUSD=X", 200, BODY, date(2024, 1, 3), date(2024, 1, 3)).unwrap();
        assert!(series.is_empty());

        let series =
            parse_chart_response("EURUSD=X", 200, BODY, date(2024, 1, 4), date(2024, 1, 4)).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_parse_chart_response_applies_exchange_offset() {
        // 23:00 UTC on 2024-01-01 is midnight the next day at +01:00
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":3600},
            "timestamp":[1704150000],"indicators":{"quote":[{"close":[0.86]}]}}],"error":null}}"#;

        let series =
            parse_chart_response("GBPUSD=X", 200, body, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(series.first_date(), Some(date(2024, 1, 2)));
    }

    #[test]
    fn test_parse_chart_response_drops_overflowing_timestamps() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":3600},
            "timestamp":[9223372036854775807,1704153600],
            "indicators":{"quote":[{"close":[1.0,1.1]}]}}],"error":null}}"#;

        let series =
            parse_chart_response("EURUSD=X", 200, body, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(series.points(), &[PricePoint::new(date(2024, 1, 2), 1.1)]);
    }

    #[test]
    fn test_parse_chart_response_reports_provider_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let err = parse_chart_response("XXXYYY=X", 404, body, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        match err {
            FetchError::Provider { pair, code, .. } => {
                assert_eq!(pair, "XXXYYY=X");
                assert_eq!(code, "Not Found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_chart_response_status_without_payload() {
        let err = parse_chart_response("EURUSD=X", 503, "Service Unavailable", date(2024, 1, 1), date(2024, 1, 2))
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }

    #[test]
    fn test_parse_chart_response_rejects_malformed_body() {
        let err = parse_chart_response("EURUSD=X", 200, "{\"chart\":", date(2024, 1, 1), date(2024, 1, 2))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_parse_chart_response_rejects_misaligned_arrays() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704153600,1704240000],
            "indicators":{"quote":[{"close":[1.1]}]}}],"error":null}}"#;

        let err = parse_chart_response("EURUSD=X", 200, body, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_period_bounds_make_end_inclusive() {
        let (p1, p2) = period_bounds(date(2024, 1, 2), date(2024, 1, 4));
        assert_eq!(p1, 1704153600);
        assert_eq!(p2, 1704326400 + 86_400);
    }

    #[test]
    fn test_chart_url_encodes_pair() {
        let provider = YahooFinanceProvider::new(&ProviderEnvConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ProviderEnvConfig::default()
        });

        let url = provider.chart_url("USDINR=X").unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/USDINR=X");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_chart_url_rejects_invalid_base() {
        let provider = YahooFinanceProvider::new(&ProviderEnvConfig {
            base_url: "not a url".to_string(),
            ..ProviderEnvConfig::default()
        });

        let err = provider.chart_url("EURUSD=X").unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
    }
}
