pub mod today_stats;
pub mod dashboard;

pub use today_stats::*;
pub use dashboard::*;
