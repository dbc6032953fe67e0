use crate::config::QueryConfig;
use crate::errors::Result;
use crate::models::trading_data::TradingData;
use crate::util;
use log::{info, warn};

/// 使用内置默认参数生成查询列表
///
/// 默认参数为 4 个交易对、2 个K线周期、2023-09-01 至 2023-10-15 共 45 天。
pub fn build_query_data_list(exchange: &str) -> Result<Vec<TradingData>> {
    build_query_data_list_with(&QueryConfig::new(), exchange)
}

/// 按配置生成查询列表
///
/// 遍历顺序：交易对在外层，K线周期居中，日期在内层。
pub fn build_query_data_list_with(config: &QueryConfig, exchange: &str) -> Result<Vec<TradingData>> {
    let day_list = util::build_day_list(&config.from_date, &config.to_date)?;

    if day_list.is_empty() {
        warn!("Empty day range {} -> {}", config.from_date, config.to_date);
    }

    let mut data_list =
        Vec::with_capacity(config.symbols.len() * config.time_intervals.len() * day_list.len());

    for symbol in &config.symbols {
        for time_interval in &config.time_intervals {
            for current_day in &day_list {
                data_list.push(TradingData::new(
                    &config.data_root,
                    exchange,
                    symbol,
                    time_interval,
                    current_day,
                    "",
                    "",
                ));
            }
        }
    }

    info!(
        "Built {} query records for {}: {} symbols x {} intervals x {} days",
        data_list.len(),
        exchange,
        config.symbols.len(),
        config.time_intervals.len(),
        day_list.len()
    );

    Ok(data_list)
}
