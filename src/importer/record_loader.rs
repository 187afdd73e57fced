// ==========================================
// 每日标本挑选系统 - 记录加载器
// ==========================================
// 职责: RawTable → 领域记录 (历史表、病例表、候选表)
// 必需列: history(area, n) / cases(area, cases) / candidates(box, plate, area, priority)
// ==========================================

use crate::domain::area::{AreaCases, AreaHistory};
use crate::domain::specimen::{CandidateTable, Specimen};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use std::collections::HashMap;
use tracing::debug;

pub struct RecordLoader;

impl RecordLoader {
    pub fn new() -> Self {
        Self
    }

    /// 历史表: area, n
    pub fn load_history(&self, table: &RawTable) -> ImportResult<Vec<AreaHistory>> {
        require_columns(table, "history", &["area", "n"])?;
        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                Ok(AreaHistory {
                    area: text(values, "area"),
                    n: parse_count(values, row, "n")?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;
        debug!(rows = records.len(), "历史表加载完成");
        Ok(records)
    }

    /// 病例表: area, cases
    pub fn load_cases(&self, table: &RawTable) -> ImportResult<Vec<AreaCases>> {
        require_columns(table, "cases", &["area", "cases"])?;
        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                Ok(AreaCases {
                    area: text(values, "area"),
                    cases: parse_count(values, row, "cases")?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;
        debug!(rows = records.len(), "病例表加载完成");
        Ok(records)
    }

    /// 候选表: box, plate, area, priority (+ 其余原样保留的列)
    ///
    /// 行标识为数据行序号 (从 0 开始)
    pub fn load_candidates(&self, table: &RawTable) -> ImportResult<CandidateTable> {
        require_columns(table, "candidates", &["box", "plate", "area", "priority"])?;

        let mut specimens = Vec::with_capacity(table.rows.len());
        let mut raw_rows = Vec::with_capacity(table.rows.len());
        for (row, values) in table.rows.iter().enumerate() {
            specimens.push(Specimen {
                row_id: row,
                box_id: text(values, "box"),
                plate_id: text(values, "plate"),
                area: text(values, "area"),
                priority: parse_flag(values, row, "priority")?,
            });
            raw_rows.push(table.ordered_values(values));
        }

        debug!(rows = specimens.len(), "候选表加载完成");
        Ok(CandidateTable {
            headers: table.headers.clone(),
            raw_rows,
            specimens,
        })
    }
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn require_columns(table: &RawTable, name: &'static str, columns: &[&str]) -> ImportResult<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(ImportError::MissingColumn {
                table: name,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn text(values: &HashMap<String, String>, field: &str) -> String {
    values.get(field).cloned().unwrap_or_default()
}

fn parse_count(values: &HashMap<String, String>, row: usize, field: &str) -> ImportResult<u64> {
    let raw = values.get(field).map(String::as_str).unwrap_or("");
    raw.parse::<u64>().map_err(|e| ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: format!("'{}' 不是非负整数: {}", raw, e),
    })
}

fn parse_flag(values: &HashMap<String, String>, row: usize, field: &str) -> ImportResult<bool> {
    let raw = values.get(field).map(String::as_str).unwrap_or("");
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" | "" => Ok(false),
        other => Err(ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("无法识别的标记值 '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;

    #[test]
    fn test_load_candidates_keeps_extra_columns() {
        let table = CsvParser
            .parse_reader(
                "box,plate,coord,area,priority\nboxC5,plate33B,A5,Cardiff,0\nbox3,plate22D,A1,Birmingham,1\n"
                    .as_bytes(),
            )
            .unwrap();

        let candidates = RecordLoader::new().load_candidates(&table).unwrap();

        assert_eq!(candidates.specimens.len(), 2);
        assert_eq!(candidates.specimens[1].row_id, 1);
        assert!(candidates.specimens[1].priority);
        assert_eq!(candidates.specimens[0].plate_id, "plate33B");
        assert_eq!(candidates.raw_rows[0][2], "A5");
    }

    #[test]
    fn test_missing_column_reported() {
        let table = CsvParser.parse_reader("area,count\nKent,1\n".as_bytes()).unwrap();
        let err = RecordLoader::new().load_history(&table).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingColumn { table: "history", ref column } if column == "n"
        ));
    }

    #[test]
    fn test_negative_count_rejected() {
        let table = CsvParser
            .parse_reader("area,cases\nKent,-3\n".as_bytes())
            .unwrap();
        let err = RecordLoader::new().load_cases(&table).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 0, .. }));
    }

    #[test]
    fn test_priority_flag_words() {
        let table = CsvParser
            .parse_reader("box,plate,area,priority\nb,p,Kent,TRUE\nb,p,Kent,no\nb,p,Kent,maybe\n".as_bytes())
            .unwrap();
        let err = RecordLoader::new().load_candidates(&table).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 2, .. }));
    }
}
