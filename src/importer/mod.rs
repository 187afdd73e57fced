// ==========================================
// 每日标本挑选系统 - 导入层
// ==========================================
// 职责: 外部表格读入 → 领域记录;挑选结果写出
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod output;
pub mod record_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
pub use output::write_picks_csv;
pub use record_loader::RecordLoader;
