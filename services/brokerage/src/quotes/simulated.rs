use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::traits::{Quote, QuoteResult, QuoteSource};
use crate::models::{Price, Symbol};

/// 内置模拟行情源
///
/// 固定报价表，价格稳定可复现；未收录的代码视为未知
pub struct SimulatedQuoteSource {
    quotes: HashMap<&'static str, (&'static str, Price)>,
}

impl SimulatedQuoteSource {
    pub fn new() -> Self {
        let mut quotes = HashMap::new();
        quotes.insert("AAPL", ("Apple Inc.", dec!(227.52)));
        quotes.insert("AMZN", ("Amazon.com, Inc.", dec!(186.40)));
        quotes.insert("GOOG", ("Alphabet Inc.", dec!(172.63)));
        quotes.insert("META", ("Meta Platforms, Inc.", dec!(514.08)));
        quotes.insert("MSFT", ("Microsoft Corporation", dec!(425.27)));
        quotes.insert("NFLX", ("Netflix, Inc.", dec!(678.12)));
        quotes.insert("NVDA", ("NVIDIA Corporation", dec!(117.93)));
        quotes.insert("TSLA", ("Tesla, Inc.", dec!(219.41)));

        Self { quotes }
    }
}

impl Default for SimulatedQuoteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for SimulatedQuoteSource {
    async fn lookup(&self, symbol: &Symbol) -> QuoteResult<Option<Quote>> {
        Ok(self.quotes.get(symbol.as_str()).map(|(name, price)| Quote {
            symbol: symbol.clone(),
            name: name.to_string(),
            price: *price,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_symbol() {
        let source = SimulatedQuoteSource::new();
        let quote = source
            .lookup(&Symbol::parse("AAPL").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.symbol.as_str(), "AAPL");
        assert_eq!(quote.name, "Apple Inc.");
        assert_eq!(quote.price, dec!(227.52));
    }

    #[tokio::test]
    async fn test_prices_are_stable() {
        let source = SimulatedQuoteSource::new();
        let symbol = Symbol::parse("TSLA").unwrap();

        let first = source.lookup(&symbol).await.unwrap().unwrap();
        let second = source.lookup(&symbol).await.unwrap().unwrap();
        assert_eq!(first.price, second.price);
    }

    #[tokio::test]
    async fn test_unknown_symbol_returns_none() {
        let source = SimulatedQuoteSource::new();
        let quote = source.lookup(&Symbol::parse("ZZZZ").unwrap()).await.unwrap();
        assert!(quote.is_none());
    }
}
