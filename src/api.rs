//! Public API Types
//!
//! 公開APIで使用する列挙型と設定ファイルの型を定義するモジュール。

use std::collections::BTreeMap;

use serde::Deserialize;

/// 入力ドキュメントの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum InputFormat {
    /// YAML形式（デフォルト）
    #[default]
    Yaml,

    /// JSON形式
    ///
    /// JSONはYAMLと同じ木構造（マッピングとシーケンス）として解釈されます。
    Json,
}

impl InputFormat {
    /// 形式名から入力形式を取得
    ///
    /// 大文字小文字は区別しません。未知の形式名の場合は`None`を返します。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use tcxlsx::InputFormat;
    ///
    /// assert_eq!(InputFormat::from_name("yml"), Some(InputFormat::Yaml));
    /// assert_eq!(InputFormat::from_name("toml"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(InputFormat::Yaml),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }
}

/// 出力フォーマット
///
/// 出力ファイルを生成できるのは`Xlsx`のみです。
/// それ以外の形式名は`Unsupported`として受け付け、エクスポート時には何も出力しません。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Excelワークブック（デフォルト）
    #[default]
    Xlsx,

    /// 未対応の形式（指定された形式名を保持）
    Unsupported(String),
}

impl OutputFormat {
    /// 形式名から出力形式を取得
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use tcxlsx::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_name("xlsx"), OutputFormat::Xlsx);
    /// assert_eq!(
    ///     OutputFormat::from_name("csv"),
    ///     OutputFormat::Unsupported("csv".to_string())
    /// );
    /// ```
    pub fn from_name(name: &str) -> Self {
        if name == "xlsx" {
            OutputFormat::Xlsx
        } else {
            OutputFormat::Unsupported(name.to_string())
        }
    }
}

/// テストケース行の通し番号を書き込む列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum NumberPlacement {
    /// 現在の列カーソル位置（デフォルト）
    ///
    /// テストケース行の番号は、そのケースが属する最も深い階層項目の右隣の列に
    /// 書き込まれます（大項目直下のケースなら3列目）。
    #[default]
    Cursor,

    /// 常に1列目（No列）
    FirstColumn,
}

/// 設定ファイルの内容
///
/// CLIの`--config`で指定されたYAMLファイルを読み込み、
/// `ExporterBuilder::with_settings()`で適用します。省略された項目はデフォルト値のままです。
///
/// # 設定例
///
/// ```yaml
/// number_placement: first_column
/// header_color: "00bfff"
/// column_widths:
///   B: 30
///   N: 40
/// strict_hierarchy: true
/// max_input_file_size: 1048576
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// 通し番号の書き込み列
    pub number_placement: Option<NumberPlacement>,

    /// ヘッダ行の塗りつぶし色（16進数RGB、例: "00bfff"）
    pub header_color: Option<String>,

    /// 列幅（列文字 → 幅）。指定した列はデフォルトの列幅を上書きします
    pub column_widths: BTreeMap<String, f64>,

    /// 階層項目が3列（大項目・中項目・小項目）を超える入力を拒否するか
    pub strict_hierarchy: Option<bool>,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: Option<u64>,
}

impl ExportSettings {
    /// YAML文字列から設定を読み込む
    pub fn from_yaml_str(text: &str) -> Result<Self, crate::error::TcXlsxError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
