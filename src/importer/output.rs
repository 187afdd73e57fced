// ==========================================
// 每日标本挑选系统 - 挑选结果写出
// ==========================================
// 输出: 候选表全部原始列 + to_pick 列 (CSV)
// ==========================================

use crate::domain::specimen::CandidateTable;
use crate::engine::result_extractor::PickResult;
use crate::importer::error::{ImportError, ImportResult};
use csv::Writer;
use std::io::Write;

/// 写出带 to_pick 列的候选表
///
/// # 参数
/// - `out`: 输出流
/// - `table`: 加载时保留的候选表
/// - `result`: 挑选结果 (与候选表行一一对应)
pub fn write_picks_csv<W: Write>(
    out: W,
    table: &CandidateTable,
    result: &PickResult,
) -> ImportResult<()> {
    let to_pick = result.to_pick_column();
    if to_pick.len() != table.raw_rows.len() {
        return Err(ImportError::CsvWriteError(format!(
            "结果行数 {} 与候选表行数 {} 不一致",
            to_pick.len(),
            table.raw_rows.len()
        )));
    }

    let mut writer = Writer::from_writer(out);
    let mut header = table.headers.clone();
    header.push("to_pick".to_string());
    writer
        .write_record(&header)
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;

    for (row, flag) in table.raw_rows.iter().zip(to_pick) {
        let mut record = row.clone();
        record.push(flag.to_string());
        writer
            .write_record(&record)
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    Ok(())
}
