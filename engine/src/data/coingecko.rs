// CoinGecko market chart client
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use shared::models::PricePoint;
use std::time::Duration;

use crate::config::AnalyzerSettings;
use crate::error::{EngineError, FetchError};

/// Anything that can produce a coin's price history. The orchestrator only sees this.
pub trait PriceSource {
    fn fetch_prices(&self, coin: &str, days: u32) -> Result<Vec<PricePoint>, FetchError>;
}

pub struct CoinGeckoClient {
    client: Client,
    base_url: Url,
    vs_currency: String,
    interval: String,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, EngineError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EngineError::ConfigError(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(EngineError::ConfigError(format!("API URL '{}' cannot carry a path", base_url)));
        }

        Ok(Self {
            client,
            base_url,
            vs_currency: "usd".to_string(),
            interval: "daily".to_string(),
        })
    }

    pub fn from_settings(settings: &AnalyzerSettings) -> Result<Self, EngineError> {
        let mut client = Self::new(&settings.api_url, Duration::from_secs(settings.request_timeout_secs))?;
        client.vs_currency = settings.vs_currency.clone();
        client.interval = settings.interval.clone();
        Ok(client)
    }

    /// `{base}/coins/{coin}/market_chart`, with the coin percent-encoded as a path segment.
    pub fn market_chart_url(&self, coin: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["coins", coin, "market_chart"]);
        }
        url
    }

    /// One GET, no retries. Prices come back in the order the API sent them.
    pub fn fetch_market_chart(
        &self,
        coin: &str,
        vs_currency: &str,
        days: u32,
        interval: &str,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let url = self.market_chart_url(coin);
        let days = days.to_string();
        tracing::debug!(coin = %coin, url = %url, days = %days, "Requesting market chart");

        let response = self
            .client
            .get(url)
            .query(&[("vs_currency", vs_currency), ("days", days.as_str()), ("interval", interval)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::StatusError { status: status.as_u16() });
        }

        let body = response.text()?;
        parse_market_chart(&body)
    }
}

impl PriceSource for CoinGeckoClient {
    fn fetch_prices(&self, coin: &str, days: u32) -> Result<Vec<PricePoint>, FetchError> {
        self.fetch_market_chart(coin, &self.vs_currency, days, &self.interval)
            .map_err(|e| {
                tracing::error!(coin = %coin, error = %e, "Error fetching data for {}: {}", coin, e);
                e
            })
    }
}

/// Extracts the `prices` array from a market chart body.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let parsed: MarketChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

    if parsed.prices.is_empty() {
        return Err(FetchError::EmptySeries);
    }

    parsed
        .prices
        .into_iter()
        .enumerate()
        .map(|(idx, (timestamp_ms, price))| {
            if !timestamp_ms.is_finite() || !price.is_finite() {
                return Err(FetchError::MalformedPayload(format!(
                    "Non-finite value in price pair #{}",
                    idx
                )));
            }
            Ok(PricePoint {
                timestamp_ms: timestamp_ms as i64,
                price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const BODY: &str = r#"{"prices":[[1700000000000,37000.5],[1700086400000,37400.25]],"market_caps":[],"total_volumes":[]}"#;

    // Answers exactly one HTTP request and hands back the raw request text.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/api/v3", addr), handle)
    }

    fn client(base_url: &str) -> CoinGeckoClient {
        // Bypass any proxy from the environment; the responder is local.
        let http = Client::builder().no_proxy().timeout(Duration::from_secs(5)).build().unwrap();
        CoinGeckoClient::with_client(base_url, http).unwrap()
    }

    #[test]
    fn test_fetch_market_chart_success() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", BODY);
        let points = client(&base_url).fetch_market_chart("bitcoin", "usd", 30, "daily").unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /api/v3/coins/bitcoin/market_chart?vs_currency=usd&days=30&interval=daily "));
        assert_eq!(
            points,
            vec![
                PricePoint { timestamp_ms: 1_700_000_000_000, price: 37000.5 },
                PricePoint { timestamp_ms: 1_700_086_400_000, price: 37400.25 },
            ]
        );
    }

    #[test]
    fn test_fetch_market_chart_bad_status() {
        let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", r#"{"error":"coin not found"}"#);
        let err = client(&base_url).fetch_prices("not-a-real-coin", 30).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, FetchError::StatusError { status: 404 }));
    }

    #[test]
    fn test_fetch_market_chart_malformed_body() {
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", "<html>busy</html>");
        let err = client(&base_url).fetch_prices("bitcoin", 30).unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn test_fetch_market_chart_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client(&format!("http://{}", addr)).fetch_prices("bitcoin", 30).unwrap_err();
        assert!(matches!(err, FetchError::NetworkError { .. }));
    }

    #[test]
    fn test_market_chart_url_encodes_coin() {
        let c = client("https://api.coingecko.com/api/v3/");
        assert_eq!(
            c.market_chart_url("bitcoin").as_str(),
            "https://api.coingecko.com/api/v3/coins/bitcoin/market_chart"
        );
        assert_eq!(
            c.market_chart_url("bit coin").as_str(),
            "https://api.coingecko.com/api/v3/coins/bit%20coin/market_chart"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(CoinGeckoClient::new("not a url", Duration::from_secs(1)).is_err());
        assert!(CoinGeckoClient::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_parse_market_chart_empty_prices() {
        assert!(matches!(parse_market_chart(r#"{"prices":[]}"#), Err(FetchError::EmptySeries)));
    }

    #[test]
    fn test_parse_market_chart_missing_prices_key() {
        assert!(matches!(parse_market_chart(r#"{"error":"rate limited"}"#), Err(FetchError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_market_chart_keeps_api_order() {
        let points = parse_market_chart(r#"{"prices":[[3000,1.5],[1000,2.5]]}"#).unwrap();
        assert_eq!(points[0].timestamp_ms, 3000);
        assert_eq!(points[1].timestamp_ms, 1000);
    }
}
