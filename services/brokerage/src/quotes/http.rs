use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::traits::{Quote, QuoteError, QuoteResult, QuoteSource};
use crate::config::QuoteConfig;
use crate::models::Symbol;

/// 行情接口响应
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    symbol: String,
    name: String,
    price: rust_decimal::Decimal,
}

/// 基于HTTP的行情源
pub struct HttpQuoteSource {
    client: Client,
    base_url: String,
}

impl HttpQuoteSource {
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn lookup(&self, symbol: &Symbol) -> QuoteResult<Option<Quote>> {
        let url = format!("{}/quote", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str())])
            .send()
            .await
            .map_err(|e| QuoteError::NetworkError(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            status => return Err(QuoteError::UpstreamError(status.as_u16())),
        }

        let body: QuoteResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::ParseError(e.to_string()))?;

        let symbol = Symbol::parse(&body.symbol).ok_or_else(|| {
            QuoteError::ParseError(format!("Invalid symbol in response: {}", body.symbol))
        })?;

        Ok(Some(Quote {
            symbol,
            name: body.name,
            price: body.price,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpQuoteSource {
        let config = QuoteConfig {
            provider: "http".to_string(),
            base_url: server.uri(),
            timeout_secs: 5,
        };
        HttpQuoteSource::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_known_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("symbol", "NFLX"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbol": "NFLX",
                "name": "Netflix, Inc.",
                "price": 423.5
            })))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let quote = source
            .lookup(&Symbol::parse("NFLX").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.symbol.as_str(), "NFLX");
        assert_eq!(quote.name, "Netflix, Inc.");
        assert_eq!(quote.price, dec!(423.5));
    }

    #[tokio::test]
    async fn test_unknown_symbol_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let quote = source
            .lookup(&Symbol::parse("ZZZZ").unwrap())
            .await
            .unwrap();

        assert!(quote.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let result = source.lookup(&Symbol::parse("AAPL").unwrap()).await;

        assert!(matches!(result, Err(QuoteError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let result = source.lookup(&Symbol::parse("AAPL").unwrap()).await;

        assert!(matches!(result, Err(QuoteError::UpstreamError(500))));
    }
}
