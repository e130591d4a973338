pub mod engine;
pub mod report;

pub use engine::{QueryEngine, QueryOutcome, sweep};
pub use report::{render_report, unknown_drug_message};
