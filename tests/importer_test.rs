// ==========================================
// 导入 → 挑选 → 写出 端到端测试
// ==========================================
// 测试目标: 验证三张输入表的加载与 to_pick 列写出
// ==========================================

mod helpers;

use even_sampling::importer::{
    write_picks_csv, CsvParser, ImportError, RecordLoader, UniversalFileParser,
};
use even_sampling::SpecimenPicker;
use helpers::test_data_builder::{
    ConfigBuilder, REFERENCE_CANDIDATES_CSV, REFERENCE_CASES_CSV, REFERENCE_HISTORY_CSV,
};
use std::io::Write;
use tempfile::Builder;

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

#[test]
fn test_end_to_end_reference_files() {
    even_sampling::logging::init_test();

    let history_file = csv_file(REFERENCE_HISTORY_CSV);
    let cases_file = csv_file(REFERENCE_CASES_CSV);
    let candidates_file = csv_file(REFERENCE_CANDIDATES_CSV);

    let parser = UniversalFileParser;
    let loader = RecordLoader::new();
    let history = loader
        .load_history(&parser.parse(history_file.path()).unwrap())
        .unwrap();
    let cases = loader
        .load_cases(&parser.parse(cases_file.path()).unwrap())
        .unwrap();
    let candidates = loader
        .load_candidates(&parser.parse(candidates_file.path()).unwrap())
        .unwrap();

    assert_eq!(history.len(), 4);
    assert_eq!(cases[1].cases, 5);
    assert_eq!(candidates.specimens.len(), 9);
    assert!(candidates.specimens[8].priority);

    let picker = SpecimenPicker::new(history, cases, ConfigBuilder::new().build()).unwrap();
    let result = picker
        .make_picks(&candidates.specimens)
        .unwrap()
        .into_result()
        .unwrap();

    let mut out = Vec::new();
    write_picks_csv(&mut out, &candidates, &result).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "box,plate,coord,area,priority,to_pick");
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[1], "boxC5,plate33B,A5,Cardiff,0,0");
    assert_eq!(lines[4], "box1,plate1413A,A3,London,0,1");
    assert_eq!(lines[9], "box3,plate22D,A1,Birmingham,1,1");
}

#[test]
fn test_write_rejects_mismatched_rows() {
    even_sampling::logging::init_test();
    let loader = RecordLoader::new();
    let history = loader
        .load_history(&CsvParser.parse_reader(REFERENCE_HISTORY_CSV.as_bytes()).unwrap())
        .unwrap();
    let cases = loader
        .load_cases(&CsvParser.parse_reader(REFERENCE_CASES_CSV.as_bytes()).unwrap())
        .unwrap();
    let mut candidates = loader
        .load_candidates(&CsvParser.parse_reader(REFERENCE_CANDIDATES_CSV.as_bytes()).unwrap())
        .unwrap();

    let picker = SpecimenPicker::new(history, cases, ConfigBuilder::new().build()).unwrap();
    let result = picker
        .make_picks(&candidates.specimens)
        .unwrap()
        .into_result()
        .unwrap();

    candidates.raw_rows.pop();
    let err = write_picks_csv(Vec::new(), &candidates, &result).unwrap_err();
    assert!(matches!(err, ImportError::CsvWriteError(_)));
}

#[test]
fn test_candidates_missing_priority_column() {
    let table = CsvParser
        .parse_reader("box,plate,area\nbox1,plateA,Kent\n".as_bytes())
        .unwrap();
    let err = RecordLoader::new().load_candidates(&table).unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingColumn { table: "candidates", ref column } if column == "priority"
    ));
}
