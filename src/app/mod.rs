pub mod dashboard;
pub mod report;
pub mod utils;
pub mod valuation;

pub use dashboard::Dashboard;
pub use valuation::valuate;
