pub mod http;
pub mod simulated;
pub mod traits;

pub use http::HttpQuoteSource;
pub use simulated::SimulatedQuoteSource;
pub use traits::{Quote, QuoteError, QuoteResult, QuoteSource};
