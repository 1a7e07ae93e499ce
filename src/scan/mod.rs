pub mod page_analysis;
pub mod score;
pub mod session;
pub mod tally;

pub use page_analysis::PageAnalysis;
pub use score::{AggregateScore, RiskLevel, ScoreConfig};
pub use session::ScanSession;
pub use tally::CategoryTally;
