pub mod ledger;
pub mod scrape;
pub mod summary;

pub use ledger::{accumulate, Customer, Row, SnackLedger};
pub use scrape::{SnackScraper, SnackScraperBuilder};
pub use summary::{reduce, CustomerSummary, OutputFormat};
