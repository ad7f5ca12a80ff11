//! Yahoo Finance quote provider.
//!
//! Fetches daily closing prices from Yahoo's v8 chart API using a period
//! string (`range={days}d`). One request per symbol, no batching and no
//! retries: provider failures propagate straight to the caller.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; parse failures map to `DataError::ResponseFormatChanged`.

use super::provider::{DataError, PricePoint, QuoteProvider};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a symbol and trailing window.
    fn chart_url(symbol: &str, days: u32) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={days}d&interval=1d"
        )
    }

    /// Parse the chart API response into price points.
    ///
    /// Entries with a null close (holidays, halted sessions) are skipped.
    /// The result is sorted ascending and truncated to the trailing `days`
    /// points so the window invariant holds even if the provider over-returns.
    fn parse_response(
        symbol: &str,
        days: u32,
        resp: ChartResponse,
    ) -> Result<Vec<PricePoint>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };

            points.push(PricePoint { date, close });
        }

        if points.is_empty() {
            return Err(DataError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        let keep = days as usize;
        if points.len() > keep {
            points.drain(..points.len() - keep);
        }

        Ok(points)
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_closes(&self, symbol: &str, days: u32) -> Result<Vec<PricePoint>, DataError> {
        let url = Self::chart_url(symbol, days);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, days, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn response_from_json(json: &str) -> ChartResponse {
        serde_json::from_str(json).expect("test fixture must parse")
    }

    // 2024-03-04, 2024-03-05, 2024-03-06 midnight UTC
    const FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1709510400, 1709596800, 1709683200],
                "indicators": {
                    "quote": [{ "close": [170.12, null, 169.12] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_closes_and_skips_nulls() {
        let resp = response_from_json(FIXTURE);
        let points = YahooProvider::parse_response("AAPL", 90, resp).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(points[0].close, 170.12);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn dates_ascend_even_if_provider_shuffles() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1709683200, 1709510400],
                    "indicators": { "quote": [{ "close": [169.12, 170.12] }] }
                }],
                "error": null
            }
        }"#;
        let points = YahooProvider::parse_response("AAPL", 90, response_from_json(json)).unwrap();
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn truncates_to_trailing_window() {
        let resp = response_from_json(FIXTURE);
        let points = YahooProvider::parse_response("AAPL", 1, resp).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn unknown_symbol_maps_to_not_found() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        }"#;
        let err = YahooProvider::parse_response("NOPE", 90, response_from_json(json)).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn all_null_closes_is_empty_history() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1709510400],
                    "indicators": { "quote": [{ "close": [null] }] }
                }],
                "error": null
            }
        }"#;
        let err = YahooProvider::parse_response("AAPL", 90, response_from_json(json)).unwrap_err();
        assert!(matches!(err, DataError::EmptyHistory { .. }));
    }

    #[test]
    fn chart_url_uses_period_string() {
        let url = YahooProvider::chart_url("MSFT", 90);
        assert!(url.contains("/chart/MSFT"));
        assert!(url.contains("range=90d"));
        assert!(url.contains("interval=1d"));
    }
}
