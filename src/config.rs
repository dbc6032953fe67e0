use chrono::NaiveDate;
use crate::errors::{QueryGenError, Result};
use crate::util::DATE_FORMAT;

/// 默认交易对
pub const DEFAULT_SYMBOLS: [&str; 4] = ["ETH/USDT", "EOS/USDT", "LTC/USDT", "BTC/USDT"];
/// 默认K线周期
pub const DEFAULT_TIME_INTERVALS: [&str; 2] = ["5m", "15m"];
pub const DEFAULT_FROM_DATE: &str = "2023-09-01";
pub const DEFAULT_TO_DATE: &str = "2023-10-15";
/// 默认数据存储根目录
pub const DEFAULT_DATA_ROOT: &str = "E:\\DB";

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub symbols: Vec<String>,
    pub time_intervals: Vec<String>,
    pub from_date: String,
    pub to_date: String,
    pub data_root: String,
}

impl QueryConfig {
    pub fn new() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            time_intervals: DEFAULT_TIME_INTERVALS.iter().map(|s| s.to_string()).collect(),
            from_date: DEFAULT_FROM_DATE.to_string(),
            to_date: DEFAULT_TO_DATE.to_string(),
            data_root: DEFAULT_DATA_ROOT.to_string(),
        }
    }

    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_time_intervals(mut self, intervals: Vec<String>) -> Self {
        self.time_intervals = intervals;
        self
    }

    pub fn with_date_range(mut self, from_date: &str, to_date: &str) -> Self {
        self.from_date = from_date.to_string();
        self.to_date = to_date.to_string();
        self
    }

    pub fn with_data_root(mut self, root: &str) -> Self {
        self.data_root = root.to_string();
        self
    }

    /// 校验日期格式及起止顺序
    ///
    /// 生成器本身对倒置区间返回空列表，命令行入口在生成前调用此方法提前报错。
    pub fn validate(&self) -> Result<()> {
        let from = NaiveDate::parse_from_str(&self.from_date, DATE_FORMAT)?;
        let to = NaiveDate::parse_from_str(&self.to_date, DATE_FORMAT)?;

        if from > to {
            return Err(QueryGenError::ConfigError(format!(
                "from_date {} is after to_date {}",
                self.from_date, self.to_date
            )));
        }

        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new()
    }
}
