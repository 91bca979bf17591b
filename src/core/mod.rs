pub mod daily;
pub mod dre;
pub mod engine;
pub mod services;

pub use daily::{calculate_daily_summary, is_daily_close_entry, provider_breakdown, DailySummary};
pub use dre::{build_annual_dre, build_dre, AnnualDre, DreSnapshot};
pub use engine::generate_financial_transactions;
