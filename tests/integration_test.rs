//! Integration Tests for tcxlsx
//!
//! ドキュメントの読み込みからワークブックの書き出しまでを通しで検証します。
//! 書き出したワークブックはcalamineで読み戻して内容を確認します。

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::PathBuf;
use tcxlsx::{
    CellValue, Document, ExportOutcome, ExporterBuilder, InputFormat, NumberPlacement,
    OutputFormat, TcXlsxError,
};

// Helper module for reading generated workbooks
mod helpers {
    use super::*;

    pub fn fixture_path(filename: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("fixtures");
        path.push(filename);
        path
    }

    pub fn open(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        open_workbook_from_rs(Cursor::new(buffer)).expect("generated workbook should open")
    }

    pub fn sheet(buffer: Vec<u8>, name: &str) -> Range<Data> {
        open(buffer)
            .worksheet_range(name)
            .expect("sheet should exist")
    }

    /// 1始まりの座標でセルを取得
    pub fn cell(range: &Range<Data>, row: u32, col: u32) -> Data {
        range
            .get_value((row - 1, col - 1))
            .cloned()
            .unwrap_or(Data::Empty)
    }

    pub fn text(range: &Range<Data>, row: u32, col: u32) -> String {
        match cell(range, row, col) {
            Data::String(s) => s,
            other => panic!("Expected string at ({}, {}), got {:?}", row, col, other),
        }
    }

    pub fn number(range: &Range<Data>, row: u32, col: u32) -> f64 {
        match cell(range, row, col) {
            Data::Float(f) => f,
            Data::Int(i) => i as f64,
            other => panic!("Expected number at ({}, {}), got {:?}", row, col, other),
        }
    }

    pub fn is_blank(range: &Range<Data>, row: u32, col: u32) -> bool {
        matches!(cell(range, row, col), Data::Empty)
    }
}

use helpers::*;

const SCENARIO: &str = r#"
sheet_name: S1
SuiteA:
  - description: d1
    procedure: p1
  - SubA:
      - description: d2
"#;

#[test]
fn test_header_row() {
    let document = Document::from_yaml_str(SCENARIO, "scenario.yaml").unwrap();
    let exporter = ExporterBuilder::new().build().unwrap();
    let range = sheet(exporter.to_buffer(&[document]).unwrap(), "S1");

    let headers: Vec<String> = (1..=14).map(|col| text(&range, 1, col)).collect();
    assert_eq!(
        headers,
        vec![
            "No", "大項目", "中項目", "小項目", "概要", "手順", "期待値", "カテゴリ", "結果",
            "作業者", "作業日", "確認者", "確認日", "備考"
        ]
    );
}

#[test]
fn test_scenario_layout() {
    let document = Document::from_yaml_str(SCENARIO, "scenario.yaml").unwrap();
    let exporter = ExporterBuilder::new().build().unwrap();
    let range = sheet(exporter.to_buffer(&[document]).unwrap(), "S1");

    // row2: スイート行と最初のケース
    assert_eq!(number(&range, 2, 1), 1.0);
    assert_eq!(text(&range, 2, 2), "SuiteA");
    assert_eq!(number(&range, 2, 3), 1.0);
    assert_eq!(text(&range, 2, 5), "d1");
    assert_eq!(text(&range, 2, 6), "p1");

    // row3: グループラベルと入れ子のケース
    assert_eq!(text(&range, 3, 3), "SubA");
    assert_eq!(number(&range, 3, 4), 2.0);
    assert_eq!(text(&range, 3, 5), "d2");
    assert!(is_blank(&range, 3, 6));

    assert_eq!(range.end().map(|(row, _)| row), Some(2));
}

#[test]
fn test_fixture_file() {
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = exporter
        .load_documents([fixture_path("login.yaml")], InputFormat::Yaml)
        .unwrap();
    let range = sheet(exporter.to_buffer(&documents).unwrap(), "ログイン");

    assert_eq!(text(&range, 2, 2), "画面表示");
    assert_eq!(text(&range, 2, 5), "初期表示");
    assert_eq!(text(&range, 2, 8), "正常系");

    assert_eq!(text(&range, 3, 3), "入力チェック");
    assert_eq!(number(&range, 3, 4), 2.0);
    assert_eq!(text(&range, 4, 4), "パスワード");
    assert_eq!(text(&range, 4, 5), "桁数不足");
    assert_eq!(text(&range, 5, 5), "桁数上限");
    assert_eq!(text(&range, 5, 14), "上限は64文字");

    // 2つ目のスイートは直前のケースの次の番号を共有する
    assert_eq!(number(&range, 6, 1), 5.0);
    assert_eq!(text(&range, 6, 2), "認証");
    assert_eq!(number(&range, 6, 3), 5.0);
    assert_eq!(text(&range, 6, 9), "OK");
    assert_eq!(text(&range, 6, 10), "tanaka");
    assert_eq!(text(&range, 6, 11), "2024-05-01");
    assert_eq!(text(&range, 6, 12), "suzuki");
    assert_eq!(text(&range, 6, 13), "2024-05-02");
}

#[test]
fn test_two_documents_two_sheets() {
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = exporter
        .load_documents(
            [fixture_path("login.yaml"), fixture_path("logout.yaml")],
            InputFormat::Yaml,
        )
        .unwrap();
    let buffer = exporter.to_buffer(&documents).unwrap();

    let mut workbook = open(buffer);
    assert_eq!(workbook.sheet_names(), vec!["ログイン", "ログアウト"]);

    // 番号はシートごとに1から
    let logout = workbook.worksheet_range("ログアウト").unwrap();
    assert_eq!(number(&logout, 2, 1), 1.0);
    assert_eq!(number(&logout, 2, 3), 1.0);
    assert_eq!(number(&logout, 3, 3), 2.0);
    assert_eq!(text(&logout, 3, 5), "セッション破棄");
}

#[test]
fn test_field_values_keep_their_type() {
    let text_input = "sheet_name: Types\nA:\n  - description: d\n    result: true\n    operate_day: 20240501\n    comment: 0.5\n";
    let document = Document::from_yaml_str(text_input, "types.yaml").unwrap();
    let exporter = ExporterBuilder::new().build().unwrap();
    let range = sheet(exporter.to_buffer(&[document]).unwrap(), "Types");

    assert_eq!(cell(&range, 2, 9), Data::Bool(true));
    assert_eq!(number(&range, 2, 11), 20240501.0);
    assert_eq!(number(&range, 2, 14), 0.5);
}

#[test]
fn test_first_column_placement() {
    let document = Document::from_yaml_str(SCENARIO, "scenario.yaml").unwrap();
    let exporter = ExporterBuilder::new()
        .with_number_placement(NumberPlacement::FirstColumn)
        .build()
        .unwrap();
    let range = sheet(exporter.to_buffer(&[document]).unwrap(), "S1");

    assert_eq!(number(&range, 2, 1), 1.0);
    assert_eq!(number(&range, 3, 1), 2.0);
    assert!(is_blank(&range, 2, 3));
    assert!(is_blank(&range, 3, 4));
}

#[test]
fn test_json_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.json");
    std::fs::write(
        &path,
        r#"{"sheet_name": "JSON", "Suite": [{"Group": [{"description": "from json"}]}]}"#,
    )
    .unwrap();

    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = exporter.load_documents([&path], InputFormat::Json).unwrap();
    let range = sheet(exporter.to_buffer(&documents).unwrap(), "JSON");

    assert_eq!(text(&range, 2, 3), "Group");
    assert_eq!(number(&range, 2, 4), 1.0);
    assert_eq!(text(&range, 2, 5), "from json");
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.xlsx");
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = exporter
        .load_documents([fixture_path("logout.yaml")], InputFormat::Yaml)
        .unwrap();

    let outcome = exporter.export(&documents, &output).unwrap();

    assert_eq!(
        outcome,
        ExportOutcome::Written {
            path: output.clone(),
            sheets: 1
        }
    );
    let buffer = std::fs::read(&output).unwrap();
    assert_eq!(text(&sheet(buffer, "ログアウト"), 2, 2), "ログアウト");
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");
    let exporter = ExporterBuilder::new()
        .with_output_format(OutputFormat::from_name("csv"))
        .build()
        .unwrap();
    let documents = exporter
        .load_documents([fixture_path("logout.yaml")], InputFormat::Yaml)
        .unwrap();

    let outcome = exporter.export(&documents, &output).unwrap();

    assert!(matches!(outcome, ExportOutcome::Skipped { .. }));
    assert!(!output.exists());
}

#[test]
fn test_missing_file_aborts() {
    let exporter = ExporterBuilder::new().build().unwrap();
    let result = exporter.load_documents(
        [fixture_path("logout.yaml"), fixture_path("missing.yaml")],
        InputFormat::Yaml,
    );
    assert!(matches!(result, Err(TcXlsxError::Io(_))));
}

#[test]
fn test_unknown_field_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unknown.yaml");
    std::fs::write(&path, "sheet_name: S\nA:\n  - description: d\n    owner: me\n").unwrap();

    let exporter = ExporterBuilder::new().build().unwrap();
    match exporter.load_documents([&path], InputFormat::Yaml) {
        Err(TcXlsxError::UnknownField { field, source_name }) => {
            assert_eq!(field, "owner");
            assert!(source_name.ends_with("unknown.yaml"));
        }
        other => panic!("Expected UnknownField, got {:?}", other),
    }
}

#[test]
fn test_grid_matches_case_count() {
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = exporter
        .load_documents([fixture_path("login.yaml")], InputFormat::Yaml)
        .unwrap();
    let grids = exporter.build_grids(&documents).unwrap();

    // ヘッダ行 + ケース数
    assert_eq!(grids[0].last_row() as usize, 1 + documents[0].case_count());
    let descriptions = (2..=grids[0].last_row())
        .filter(|&row| matches!(grids[0].value(row, 5), Some(CellValue::String(_))))
        .count();
    assert_eq!(descriptions, documents[0].case_count());
}
