// crates/gc_io/src/accretion_log.rs

//! 吸积记录读取
//!
//! 空白分隔的数值表，每行一次吸积事件。`#` 开头的行与空行忽略。
//! ID 可能以浮点形式写出（如 `1.2345e+05`），读入后必须是非负整数。

use gc_fields::{AccretionLog, AccretionRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

use crate::error::{IoError, IoResult};

/// 读取吸积记录文件
pub fn read_accretion_log(path: &Path, sink_column: usize, gas_column: usize) -> IoResult<AccretionLog> {
    let file = File::open(path).map_err(|e| IoError::access(path, e))?;
    let log = parse_accretion_log(BufReader::new(file), path, sink_column, gas_column)?;
    info!(path = %path.display(), rows = log.len(), "读取吸积记录");
    Ok(log)
}

/// 从任意读取器解析吸积记录；`source` 仅用于错误信息
pub fn parse_accretion_log<R: BufRead>(
    reader: R,
    source: &Path,
    sink_column: usize,
    gas_column: usize,
) -> IoResult<AccretionLog> {
    let needed = sink_column.max(gas_column) + 1;
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| IoError::access(source, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = trimmed.split_whitespace().collect();
        if columns.len() < needed {
            return Err(IoError::parse(
                source,
                line_no,
                format!("需要至少 {needed} 列，实际 {} 列", columns.len()),
            ));
        }

        records.push(AccretionRecord {
            sink_id: parse_id(columns[sink_column], source, line_no)?,
            gas_id: parse_id(columns[gas_column], source, line_no)?,
        });
    }

    Ok(AccretionLog::from_records(records))
}

fn parse_id(token: &str, source: &Path, line_no: usize) -> IoResult<u64> {
    if let Ok(id) = token.parse::<u64>() {
        return Ok(id);
    }
    let value: f64 = token
        .parse()
        .map_err(|_| IoError::parse(source, line_no, format!("无法解析 ID: {token}")))?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(IoError::parse(source, line_no, format!("ID 必须是非负整数: {token}")));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
# time sink_id mass x y z gas_id
0.1 100 1.0 0 0 0 2

0.2 100 1.0 0 0 0 4.0e+00
0.3 2.0e2 1.0 0 0 0 5
";

    #[test]
    fn test_parse_sample() {
        let log = parse_accretion_log(Cursor::new(SAMPLE), Path::new("sample"), 1, 6).unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.records()[1], AccretionRecord { sink_id: 100, gas_id: 4 });
        assert_eq!(log.records()[2].sink_id, 200);
    }

    #[test]
    fn test_short_row_reports_line() {
        let text = "0.1 100 1 0 0 0 2\n0.2 100\n";
        let err = parse_accretion_log(Cursor::new(text), Path::new("log"), 1, 6).unwrap_err();
        match err {
            IoError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_fractional_id_rejected() {
        let text = "0.1 100.5 1 0 0 0 2\n";
        assert!(parse_accretion_log(Cursor::new(text), Path::new("log"), 1, 6).is_err());
    }
}
