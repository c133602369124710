pub mod account_service;
pub mod portfolio_service;
pub mod trading_service;

pub use account_service::AccountService;
pub use portfolio_service::PortfolioService;
pub use trading_service::TradingService;
