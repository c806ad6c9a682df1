//! Builder Module
//!
//! Fluent Builder APIを提供し、`Exporter`インスタンスを段階的に構築する。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

use crate::api::{ExportSettings, InputFormat, NumberPlacement, OutputFormat};
use crate::document::{load_documents, Document};
use crate::error::TcXlsxError;
use crate::flatten::Flattener;
use crate::grid::{CellFormats, SheetGrid};
use crate::limits::{check_hierarchy_depth, unique_sheet_name, InputLimits};
use crate::types::col_letter_to_number;

/// ヘッダ行のデフォルトの塗りつぶし色（deepskyblue）
const DEFAULT_HEADER_COLOR: &str = "00bfff";

/// Excelの列幅の上限
const MAX_COLUMN_WIDTH: f64 = 255.0;

/// エクスポート処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExportConfig {
    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// 通し番号の書き込み列
    pub number_placement: NumberPlacement,

    /// ヘッダ行の塗りつぶし色（16進数RGB）
    pub header_color: String,

    /// 列幅（列文字 → 幅）
    pub column_widths: BTreeMap<String, f64>,

    /// 階層項目が3列を超える入力を拒否するか
    pub strict_hierarchy: bool,

    /// 入力制限
    pub limits: InputLimits,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let mut column_widths = BTreeMap::new();
        for column in ["B", "C", "D", "E", "F", "G"] {
            column_widths.insert(column.to_string(), 30.0);
        }
        column_widths.insert("N".to_string(), 40.0);

        Self {
            output_format: OutputFormat::Xlsx,
            number_placement: NumberPlacement::Cursor,
            header_color: DEFAULT_HEADER_COLOR.to_string(),
            column_widths,
            strict_hierarchy: false,
            limits: InputLimits::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use tcxlsx::{ExporterBuilder, NumberPlacement};
///
/// # fn main() -> Result<(), tcxlsx::TcXlsxError> {
/// let exporter = ExporterBuilder::new()
///     .with_number_placement(NumberPlacement::FirstColumn)
///     .with_column_width("H", 20.0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExporterBuilder {
    /// 内部設定（構築中）
    config: ExportConfig,
}

impl ExporterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力フォーマット: xlsx
    /// - 通し番号: 列カーソル位置
    /// - ヘッダ色: `00bfff`
    /// - 列幅: B〜G列 = 30、N列 = 40
    /// - 階層の深さ: 検証しない
    /// - 入力ファイルの最大サイズ: 64MB
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// テストケース行の通し番号を書き込む列を指定する
    pub fn with_number_placement(mut self, placement: NumberPlacement) -> Self {
        self.config.number_placement = placement;
        self
    }

    /// ヘッダ行の塗りつぶし色を指定する
    ///
    /// # 引数
    ///
    /// * `color` - 16進数RGB（例: `"00bfff"`、`"#FF0000"`）
    pub fn with_header_color(mut self, color: impl Into<String>) -> Self {
        self.config.header_color = color.into();
        self
    }

    /// 列幅を指定する
    ///
    /// デフォルトの列幅（B〜G列、N列）も同じ列を指定すれば上書きされます。
    ///
    /// # 引数
    ///
    /// * `column` - 列文字（例: `"B"`）
    /// * `width` - 列幅（0〜255）
    pub fn with_column_width(mut self, column: &str, width: f64) -> Self {
        self.config
            .column_widths
            .insert(column.to_ascii_uppercase(), width);
        self
    }

    /// 階層項目が大項目・中項目・小項目の3列を超える入力を拒否するかを指定する
    pub fn with_strict_hierarchy(mut self, strict: bool) -> Self {
        self.config.strict_hierarchy = strict;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_file_size(mut self, size: u64) -> Self {
        self.config.limits.max_input_file_size = size;
        self
    }

    /// 設定ファイルの内容を適用する
    ///
    /// 設定ファイルで指定された項目のみを上書きします。
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        if let Some(placement) = settings.number_placement {
            self = self.with_number_placement(placement);
        }
        if let Some(color) = settings.header_color {
            self = self.with_header_color(color);
        }
        for (column, width) in settings.column_widths {
            self = self.with_column_width(&column, width);
        }
        if let Some(strict) = settings.strict_hierarchy {
            self = self.with_strict_hierarchy(strict);
        }
        if let Some(size) = settings.max_input_file_size {
            self = self.with_max_input_file_size(size);
        }
        self
    }

    /// 設定を検証し、`Exporter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `TcXlsxError::Config(String)`: 設定の検証に失敗した場合
    ///   * ヘッダ色が6桁の16進数でない
    ///   * 列文字が不正、または列幅が0〜255の範囲外
    ///   * 入力ファイルの最大サイズが0
    pub fn build(self) -> Result<Exporter, TcXlsxError> {
        // 1. ヘッダ色の検証
        let header_color = parse_hex_color(&self.config.header_color).ok_or_else(|| {
            TcXlsxError::Config(format!(
                "Invalid header color: '{}' (expected 6 hex digits)",
                self.config.header_color
            ))
        })?;

        // 2. 列幅の検証
        let mut column_widths = Vec::with_capacity(self.config.column_widths.len());
        for (column, &width) in &self.config.column_widths {
            let number = col_letter_to_number(column).ok_or_else(|| {
                TcXlsxError::Config(format!("Invalid column letter: '{}'", column))
            })?;
            if !(0.0..=MAX_COLUMN_WIDTH).contains(&width) {
                return Err(TcXlsxError::Config(format!(
                    "Invalid width for column {}: {} (expected 0 to {})",
                    column, width, MAX_COLUMN_WIDTH
                )));
            }
            column_widths.push((number, width));
        }

        // 3. 入力制限の検証
        if self.config.limits.max_input_file_size == 0 {
            return Err(TcXlsxError::Config(
                "Maximum input file size must be greater than 0".to_string(),
            ));
        }

        Ok(Exporter {
            flattener: Flattener::new(self.config.number_placement),
            config: self.config,
            header_color,
            column_widths,
        })
    }
}

/// 16進数RGB文字列を数値に変換（先頭の`#`は省略可）
fn parse_hex_color(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// エクスポートの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// ワークブックを書き出した
    Written {
        /// 出力先
        path: PathBuf,
        /// シート数
        sheets: usize,
    },

    /// 未対応の出力フォーマットのため何も出力しなかった
    Skipped {
        /// 指定された形式名
        format: String,
    },
}

/// エクスポート処理のファサード
///
/// 読み込んだドキュメントをテスト仕様書のワークブックに変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use tcxlsx::{ExporterBuilder, InputFormat};
///
/// # fn main() -> Result<(), tcxlsx::TcXlsxError> {
/// let exporter = ExporterBuilder::new().build()?;
/// let documents = exporter.load_documents(["login.yaml", "logout.yaml"], InputFormat::Yaml)?;
/// exporter.export(&documents, "output.xlsx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Exporter {
    /// エクスポート設定
    config: ExportConfig,

    /// テストケース木の展開処理
    flattener: Flattener,

    /// 検証済みのヘッダ色
    header_color: u32,

    /// 検証済みの列幅（列番号 → 幅）
    column_widths: Vec<(u16, f64)>,
}

impl Exporter {
    /// 入力ファイルを順に読み込む（入力制限を適用）
    pub fn load_documents<I, P>(
        &self,
        paths: I,
        format: InputFormat,
    ) -> Result<Vec<Document>, TcXlsxError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        load_documents(paths, format, &self.config.limits)
    }

    /// 各ドキュメントを1シート分のグリッドに展開する
    ///
    /// ファイルには何も書き込みません。ドキュメントごとに行・通し番号は初期化されます。
    /// シート名が重複する場合は後から現れたシートの名前に連番を付けます（`S` → `S1`）。
    pub fn build_grids(&self, documents: &[Document]) -> Result<Vec<SheetGrid>, TcXlsxError> {
        let mut used_names: Vec<String> = Vec::with_capacity(documents.len());
        let mut grids = Vec::with_capacity(documents.len());

        for document in documents {
            if self.config.strict_hierarchy {
                check_hierarchy_depth(document)?;
            }

            let mut grid = self.flattener.flatten_document(document);
            let name = unique_sheet_name(&used_names, grid.name());
            if name != grid.name() {
                warn!(
                    source = document.source_name(),
                    from = grid.name(),
                    to = %name,
                    "duplicate sheet name, renamed"
                );
                grid.rename(name.clone());
            }
            used_names.push(name);
            grids.push(grid);
        }

        Ok(grids)
    }

    /// ワークブックを生成し、バイト列として返す
    ///
    /// 出力フォーマットの設定にかかわらず、常にxlsxを生成します。
    pub fn to_buffer(&self, documents: &[Document]) -> Result<Vec<u8>, TcXlsxError> {
        let mut workbook = self.build_workbook(documents)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// ワークブックを生成し、ファイルに書き出す
    ///
    /// 出力フォーマットが`Xlsx`以外の場合は何も出力せず、`ExportOutcome::Skipped`を返します。
    /// すべてのドキュメントの展開に成功した後でのみファイルを書き込むため、
    /// エラー時に不完全なファイルは残りません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExportOutcome)` - 書き出した、または未対応形式のためスキップした場合
    /// * `Err(TcXlsxError)` - 展開・シート名・書き込みのいずれかに失敗した場合
    pub fn export<P: AsRef<Path>>(
        &self,
        documents: &[Document],
        output: P,
    ) -> Result<ExportOutcome, TcXlsxError> {
        let output = output.as_ref();

        match &self.config.output_format {
            OutputFormat::Xlsx => {
                let buffer = self.to_buffer(documents)?;
                fs::write(output, &buffer)?;
                info!(
                    path = %output.display(),
                    sheets = documents.len(),
                    bytes = buffer.len(),
                    "wrote workbook"
                );
                Ok(ExportOutcome::Written {
                    path: output.to_path_buf(),
                    sheets: documents.len(),
                })
            }
            OutputFormat::Unsupported(format) => {
                warn!(format = %format, "unsupported output format, nothing written");
                Ok(ExportOutcome::Skipped {
                    format: format.clone(),
                })
            }
        }
    }

    /// ワークブックを構築（内部ヘルパー）
    fn build_workbook(&self, documents: &[Document]) -> Result<Workbook, TcXlsxError> {
        let grids = self.build_grids(documents)?;
        let formats = CellFormats::new(self.header_color);
        let mut workbook = Workbook::new();

        for grid in &grids {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(grid.name())?;
            grid.render_xlsx(worksheet, &formats)?;

            for &(column, width) in &self.column_widths {
                worksheet.set_column_width(column - 1, width)?;
            }
        }

        Ok(workbook)
    }
}
