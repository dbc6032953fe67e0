// 公开导出的模块，供外部使用
pub mod models;
pub mod data_provider;
pub mod errors;
pub mod config;
pub mod services;
pub mod util;

// 重新导出常用类型，方便使用
pub use models::trading_data::TradingData;
pub use data_provider::QueryDataProvider;
pub use config::QueryConfig;
pub use services::query_service::{build_query_data_list, build_query_data_list_with};
pub use util::build_day_list;
pub use errors::{Result, QueryGenError};
