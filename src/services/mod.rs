pub mod backend_client;
pub mod catalog_service;
pub mod csv_service;
pub mod dashboard_service;
pub mod filter_service;
pub mod follow_up_service;
pub mod lead_service;
pub mod user_service;
pub mod visibility_service;
