pub mod jwt;
pub mod logging;
pub mod metrics;

pub use jwt::{Claims, JwtService};
pub use logging::LoggingInitializer;
pub use metrics::{AppMetrics, MetricsCollector};
