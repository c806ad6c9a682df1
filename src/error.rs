//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// tcxlsxクレート全体で使用するエラー型
///
/// 入力ファイルの読み込み、テストケース木の解釈、Excelファイルの書き出し中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
/// どのエラーも処理全体を中断させ、部分的な出力は行いません。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（入力ファイルが存在しない、出力先に書き込めないなど）
/// - `Yaml` / `Json`: 入力ファイルの構文解析エラー
/// - `Xlsx`: ワークブック生成中のエラー（不正なシート名など）
/// - `MissingSheetName` / `UnknownField` / `InvalidGroup` / `InvalidValue` / `InvalidDocument`:
///   テストケース木の構造エラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `LimitExceeded`: 入力制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use tcxlsx::TcXlsxError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<(), TcXlsxError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum TcXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAMLの構文解析エラー
    #[error("Failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSONの構文解析エラー
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// ワークブックの生成・保存中に発生したエラー
    ///
    /// シート名の重複や禁止文字、保存先への書き込み失敗などが原因となります。
    #[error("Failed to write Excel workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// ドキュメントに`sheet_name`キーが存在しない
    #[error("Document '{source_name}' has no 'sheet_name' key")]
    MissingSheetName {
        /// 入力元（ファイルパスなど）
        source_name: String,
    },

    /// テストケースに列マッピングに存在しないフィールドが含まれている
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use tcxlsx::TcXlsxError;
    ///
    /// let error = TcXlsxError::UnknownField {
    ///     source_name: "login.yaml".to_string(),
    ///     field: "priority".to_string(),
    /// };
    ///
    /// println!("{}", error);
    /// // 出力: "Unknown field 'priority' in 'login.yaml'"
    /// ```
    #[error("Unknown field '{field}' in '{source_name}'")]
    UnknownField {
        /// 入力元
        source_name: String,
        /// 未知のフィールド名
        field: String,
    },

    /// グループノードの形式が不正（キーが1つでない、子がリストでないなど）
    #[error("Invalid group in '{source_name}': {message}")]
    InvalidGroup {
        /// 入力元
        source_name: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// テストケースのフィールド値がスカラーでない
    #[error("Field '{field}' in '{source_name}' must be a scalar value")]
    InvalidValue {
        /// 入力元
        source_name: String,
        /// フィールド名
        field: String,
    },

    /// ドキュメント全体の形式が不正
    #[error("Invalid document '{source_name}': {message}")]
    InvalidDocument {
        /// 入力元
        source_name: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ExporterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過や、階層の深さの上限超過などで発生します。
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}
