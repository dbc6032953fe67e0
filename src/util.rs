use chrono::{NaiveDate, NaiveTime};
use log::debug;
use crate::errors::Result;

/// 输入日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 日期列表中时间戳的格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 生成闭区间 `[from_date, to_date]` 内每天零点的时间戳列表
///
/// `from_date > to_date` 时返回空列表。
pub fn build_day_list(from_date: &str, to_date: &str) -> Result<Vec<String>> {
    let from = NaiveDate::parse_from_str(from_date, DATE_FORMAT)?;
    let to = NaiveDate::parse_from_str(to_date, DATE_FORMAT)?;

    let mut day_list = Vec::new();
    let mut current = from;
    while current <= to {
        let midnight = current.and_time(NaiveTime::default());
        day_list.push(midnight.format(TIMESTAMP_FORMAT).to_string());

        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    debug!("Built {} days from {} to {}", day_list.len(), from_date, to_date);
    Ok(day_list)
}

// 解析逗号分隔的列表，去掉空白和空项
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

// Arrow数据转换工具
pub mod arrow_utils {
    use super::*;
    use crate::errors::QueryGenError;
    use crate::models::trading_data::TradingData;
    use arrow::array::{ArrayRef, StringBuilder};
    use arrow::record_batch::RecordBatch;
    use arrow_array::{Array, StringArray};
    use arrow_ipc::reader::FileReader;
    use arrow_ipc::writer::FileWriter;
    use arrow_schema::{DataType, Field, Schema};
    use log::info;
    use std::fs::File;
    use std::io::{Cursor, Read, Seek};
    use std::sync::Arc;

    /// 列名，顺序与 `TradingData` 字段一致
    pub const COLUMNS: [&str; 7] = [
        "data_root",
        "exchange",
        "symbol",
        "time_interval",
        "timestamp",
        "reserved1",
        "reserved2",
    ];

    pub fn trading_data_schema() -> Schema {
        Schema::new(
            COLUMNS
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        )
    }

    // 将查询参数转换为Arrow记录批次
    pub fn trading_data_to_record_batch(data: &[TradingData]) -> Result<RecordBatch> {
        let mut builders: Vec<StringBuilder> = COLUMNS.iter().map(|_| StringBuilder::new()).collect();

        for record in data {
            let values = [
                record.data_root(),
                record.exchange(),
                record.symbol(),
                record.time_interval(),
                record.timestamp(),
                record.reserved1(),
                record.reserved2(),
            ];
            for (builder, value) in builders.iter_mut().zip(values) {
                builder.append_value(value);
            }
        }

        let columns: Vec<ArrayRef> = builders
            .iter_mut()
            .map(|builder| Arc::new(builder.finish()) as ArrayRef)
            .collect();

        RecordBatch::try_new(Arc::new(trading_data_schema()), columns)
            .map_err(|e| QueryGenError::ArrowError(e.to_string()))
    }

    fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
        batch
            .column_by_name(name)
            .and_then(|array| array.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| QueryGenError::ArrowError(format!("Failed to downcast {} column", name)))
    }

    fn read_batches<R: Read + Seek>(reader: R) -> Result<Vec<TradingData>> {
        let reader = FileReader::try_new(reader, None)
            .map_err(|e| QueryGenError::ArrowError(e.to_string()))?;

        let mut result = Vec::new();

        for batch in reader {
            let batch = batch.map_err(|e| QueryGenError::ArrowError(e.to_string()))?;

            let columns = COLUMNS
                .iter()
                .map(|name| string_column(&batch, name))
                .collect::<Result<Vec<_>>>()?;

            for i in 0..batch.num_rows() {
                result.push(TradingData::new(
                    columns[0].value(i),
                    columns[1].value(i),
                    columns[2].value(i),
                    columns[3].value(i),
                    columns[4].value(i),
                    columns[5].value(i),
                    columns[6].value(i),
                ));
            }
        }

        Ok(result)
    }

    // 从Arrow文件读取查询参数
    pub fn read_trading_data_from_arrow(path: &str) -> Result<Vec<TradingData>> {
        let file = File::open(path)?;
        read_batches(file)
    }

    // 从内存中读取Arrow数据
    pub fn read_trading_data_from_memory(data: &[u8]) -> Result<Vec<TradingData>> {
        read_batches(Cursor::new(data))
    }

    // 将查询参数保存到Arrow文件
    pub fn save_trading_data_to_arrow(data: &[TradingData], path: &str) -> Result<()> {
        info!("Saving {} query records to {}", data.len(), path);

        let batch = trading_data_to_record_batch(data)?;
        let file = File::create(path)?;

        let mut writer = FileWriter::try_new(file, &batch.schema())
            .map_err(|e| QueryGenError::ArrowError(e.to_string()))?;

        writer.write(&batch)
            .map_err(|e| QueryGenError::ArrowError(e.to_string()))?;
        writer.finish()
            .map_err(|e| QueryGenError::ArrowError(e.to_string()))?;

        Ok(())
    }
}

// JSON导出工具
pub mod json_utils {
    use super::*;
    use crate::errors::QueryGenError;
    use crate::models::trading_data::TradingData;
    use log::info;
    use std::fs::File;
    use std::io::{BufReader, BufWriter, Write};

    pub fn save_trading_data_to_json(data: &[TradingData], path: &str) -> Result<()> {
        info!("Saving {} query records to {}", data.len(), path);

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, data).map_err(|e| {
            if e.is_io() {
                QueryGenError::IoError(e.into())
            } else {
                QueryGenError::JsonError(e)
            }
        })?;
        // BufWriter 在 drop 时会吞掉写入错误
        writer.flush()?;
        Ok(())
    }

    pub fn read_trading_data_from_json(path: &str) -> Result<Vec<TradingData>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QueryGenError;
    use crate::models::trading_data::TradingData;
    use arrow::array::ArrayRef;
    use arrow::record_batch::RecordBatch;
    use arrow_array::{Int32Array, StringArray};
    use arrow_ipc::writer::FileWriter;
    use arrow_schema::{DataType, Field, Schema};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("querygen_{}_{}", std::process::id(), name))
    }

    fn sample_records() -> Vec<TradingData> {
        vec![
            TradingData::new("E:\\DB", "binance", "ETH/USDT", "5m", "2023-09-01 00:00:00", "", ""),
            TradingData::new("E:\\DB", "binance", "ETH/USDT", "15m", "2023-09-01 00:00:00", "", ""),
            TradingData::new("E:\\DB", "binance", "BTC/USDT", "5m", "2023-09-02 00:00:00", "", ""),
        ]
    }

    // 按给定 schema 写出单批次的 Arrow IPC 文件内容
    fn ipc_bytes(fields: Vec<Field>, columns: Vec<ArrayRef>) -> Vec<u8> {
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();
        let mut buf = Vec::new();
        {
            let mut writer = FileWriter::try_new(&mut buf, &batch.schema()).unwrap();
            writer.write(&batch).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    fn utf8_column(value: &str) -> ArrayRef {
        Arc::new(StringArray::from(vec![value]))
    }

    #[test]
    fn test_build_day_list_two_days() {
        let days = build_day_list("2023-09-01", "2023-09-02").unwrap();

        assert_eq!(days, vec!["2023-09-01 00:00:00", "2023-09-02 00:00:00"]);
    }

    #[test]
    fn test_build_day_list_single_day() {
        let days = build_day_list("2023-09-01", "2023-09-01").unwrap();

        assert_eq!(days, vec!["2023-09-01 00:00:00"]);
    }

    #[test]
    fn test_build_day_list_reversed_is_empty() {
        let days = build_day_list("2023-09-02", "2023-09-01").unwrap();

        assert!(days.is_empty());
    }

    #[test]
    fn test_build_day_list_default_range_length() {
        let days = build_day_list("2023-09-01", "2023-10-15").unwrap();

        assert_eq!(days.len(), 45);
        assert_eq!(days.first().unwrap(), "2023-09-01 00:00:00");
        assert_eq!(days[29], "2023-09-30 00:00:00");
        assert_eq!(days[30], "2023-10-01 00:00:00");
        assert_eq!(days.last().unwrap(), "2023-10-15 00:00:00");
    }

    #[test]
    fn test_build_day_list_crosses_leap_day_and_year() {
        let leap = build_day_list("2024-02-28", "2024-03-01").unwrap();
        assert_eq!(leap, vec!["2024-02-28 00:00:00", "2024-02-29 00:00:00", "2024-03-01 00:00:00"]);

        let new_year = build_day_list("2023-12-31", "2024-01-01").unwrap();
        assert_eq!(new_year, vec!["2023-12-31 00:00:00", "2024-01-01 00:00:00"]);
    }

    #[test]
    fn test_build_day_list_rejects_malformed_dates() {
        assert!(matches!(build_day_list("2023/09/01", "2023-09-02"), Err(QueryGenError::DateError(_))));
        assert!(matches!(build_day_list("2023-09-01", "2023-02-30"), Err(QueryGenError::DateError(_))));
        assert!(matches!(build_day_list("", "2023-09-02"), Err(QueryGenError::DateError(_))));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("ETH/USDT, BTC/USDT,,"), vec!["ETH/USDT", "BTC/USDT"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_arrow_file_roundtrip() {
        let records = sample_records();
        let path = temp_path("roundtrip.arrow");
        let path_str = path.to_str().unwrap();

        arrow_utils::save_trading_data_to_arrow(&records, path_str).unwrap();
        let loaded = arrow_utils::read_trading_data_from_arrow(path_str).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_arrow_memory_roundtrip_empty() {
        let path = temp_path("empty.arrow");
        let path_str = path.to_str().unwrap();

        arrow_utils::save_trading_data_to_arrow(&[], path_str).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let loaded = arrow_utils::read_trading_data_from_memory(&bytes).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_record_batch_schema() {
        let batch = arrow_utils::trading_data_to_record_batch(&sample_records()).unwrap();

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 7);
        assert_eq!(batch.schema().field(2).name(), "symbol");
    }

    #[test]
    fn test_read_garbage_is_arrow_error() {
        let result = arrow_utils::read_trading_data_from_memory(b"not an arrow file");

        assert!(matches!(result, Err(QueryGenError::ArrowError(_))));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let records = sample_records();
        let path = temp_path("roundtrip.json");
        let path_str = path.to_str().unwrap();

        json_utils::save_trading_data_to_json(&records, path_str).unwrap();
        let loaded = json_utils::read_trading_data_from_json(path_str).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_read_missing_column_is_arrow_error() {
        let names = &arrow_utils::COLUMNS[..6];
        let fields = names.iter().map(|name| Field::new(*name, DataType::Utf8, false)).collect();
        let columns = names.iter().map(|_| utf8_column("x")).collect();

        let result = arrow_utils::read_trading_data_from_memory(&ipc_bytes(fields, columns));

        assert!(matches!(result, Err(QueryGenError::ArrowError(_))));
    }

    #[test]
    fn test_read_non_string_column_is_arrow_error() {
        let fields = arrow_utils::COLUMNS
            .iter()
            .map(|name| {
                let data_type = if *name == "symbol" { DataType::Int32 } else { DataType::Utf8 };
                Field::new(*name, data_type, false)
            })
            .collect();
        let columns = arrow_utils::COLUMNS
            .iter()
            .map(|name| {
                if *name == "symbol" {
                    Arc::new(Int32Array::from(vec![1])) as ArrayRef
                } else {
                    utf8_column("x")
                }
            })
            .collect();

        let result = arrow_utils::read_trading_data_from_memory(&ipc_bytes(fields, columns));

        assert!(matches!(result, Err(QueryGenError::ArrowError(_))));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_json_write_failure_is_io_error() {
        // 记录数很少，内容全部停留在缓冲区内，直到 flush 才真正写入
        let result = json_utils::save_trading_data_to_json(&sample_records(), "/dev/full");

        assert!(matches!(result, Err(QueryGenError::IoError(_))));
    }
}
