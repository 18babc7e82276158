pub mod chart_service;
pub mod currency_service;
pub mod dashboard_service;
pub mod journal_service;
pub mod summary_service;
pub mod window_service;
