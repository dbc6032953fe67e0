use serde::{Deserialize, Serialize};

/// 单条查询参数：一个交易对、一个K线周期、一天
///
/// 记录创建后不可修改，只提供只读访问。`reserved1`/`reserved2`
/// 为保留字段，生成时恒为空字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingData {
    data_root: String,
    exchange: String,
    symbol: String,
    time_interval: String,
    timestamp: String,
    reserved1: String,
    reserved2: String,
}

impl TradingData {
    pub fn new(
        data_root: &str,
        exchange: &str,
        symbol: &str,
        time_interval: &str,
        timestamp: &str,
        reserved1: &str,
        reserved2: &str,
    ) -> Self {
        Self {
            data_root: data_root.to_string(),
            exchange: exchange.to_string(),
            symbol: symbol.to_string(),
            time_interval: time_interval.to_string(),
            timestamp: timestamp.to_string(),
            reserved1: reserved1.to_string(),
            reserved2: reserved2.to_string(),
        }
    }

    /// 数据存储根目录
    pub fn data_root(&self) -> &str {
        &self.data_root
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn time_interval(&self) -> &str {
        &self.time_interval
    }

    /// `YYYY-MM-DD HH:MM:SS` 格式的时间戳
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// 时间戳的日期部分 (`YYYY-MM-DD`)
    pub fn day(&self) -> &str {
        self.timestamp.split(' ').next().unwrap_or(&self.timestamp)
    }

    pub fn reserved1(&self) -> &str {
        &self.reserved1
    }

    pub fn reserved2(&self) -> &str {
        &self.reserved2
    }
}
