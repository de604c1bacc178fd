pub mod api;
pub mod bulk;
pub mod columns;
pub mod report_filter;
pub mod ui;
