pub mod chart_service;
pub mod report_service;
pub mod summary_service;

pub use chart_service::ChartService;
pub use report_service::{format_amount, ExpenseReport, ReportService};
pub use summary_service::{CategoryTotals, MonthlySummary, SummaryService};
