use log::info;

use crate::errors::Result;
use crate::models::trading_data::TradingData;
use crate::util::arrow_utils;
use std::collections::{HashMap, HashSet};

/// 查询参数提供者，对生成的查询列表建立索引
pub struct QueryDataProvider {
    data: Vec<TradingData>,
    // 索引用于快速查找，值为 data 中的下标，保持生成顺序
    symbol_index: HashMap<String, Vec<usize>>,
    interval_index: HashMap<String, Vec<usize>>,
}

impl QueryDataProvider {
    /// 使用已有数据创建实例
    pub fn new_with_data(data: Vec<TradingData>) -> Self {
        let mut provider = Self {
            data,
            symbol_index: HashMap::new(),
            interval_index: HashMap::new(),
        };
        provider.rebuild_indices();
        provider
    }

    /// 从Arrow文件加载
    pub fn load_from_file(path: &str) -> Result<Self> {
        let data = arrow_utils::read_trading_data_from_arrow(path)?;
        info!("Loaded {} query records from {}", data.len(), path);
        Ok(Self::new_with_data(data))
    }

    /// 保存到Arrow文件
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        arrow_utils::save_trading_data_to_arrow(&self.data, path)
    }

    pub fn get_all_records(&self) -> &[TradingData] {
        &self.data
    }

    pub fn get_records_by_symbol(&self, symbol: &str) -> Vec<&TradingData> {
        self.lookup(&self.symbol_index, symbol)
    }

    pub fn get_records_by_interval(&self, time_interval: &str) -> Vec<&TradingData> {
        self.lookup(&self.interval_index, time_interval)
    }

    /// 按日期 (`YYYY-MM-DD`) 过滤
    pub fn get_records_for_day(&self, day: &str) -> Vec<&TradingData> {
        self.data.iter().filter(|d| d.day() == day).collect()
    }

    /// 去重后的交易对，按首次出现顺序
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.data
            .iter()
            .map(|record| record.symbol())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// 去重后的日期，按首次出现顺序
    pub fn days(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.data
            .iter()
            .map(|record| record.day())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn lookup(&self, index: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&TradingData> {
        index
            .get(key)
            .map(|positions| positions.iter().map(|&i| &self.data[i]).collect())
            .unwrap_or_default()
    }

    fn rebuild_indices(&mut self) {
        self.symbol_index.clear();
        self.interval_index.clear();

        for (i, record) in self.data.iter().enumerate() {
            self.symbol_index
                .entry(record.symbol().to_string())
                .or_default()
                .push(i);
            self.interval_index
                .entry(record.time_interval().to_string())
                .or_default()
                .push(i);
        }
    }
}
