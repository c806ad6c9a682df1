//! Grid Module
//!
//! 1シート分のセルを保持するスパースなグリッド構造と、
//! それを`rust_xlsxwriter`のワークシートへ書き出す処理を提供するモジュール。

use std::collections::btree_map;
use std::collections::BTreeMap;

use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Worksheet};

use crate::error::TcXlsxError;
use crate::types::{CellCoord, CellValue};

/// セルの書式の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// ヘッダ行（罫線 + 塗りつぶし）
    Header,
    /// データ行（罫線のみ）
    Body,
}

/// グリッド上の1セル
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// セルの値
    pub value: CellValue,

    /// 書式の種類
    pub style: CellStyle,
}

/// 1シート分のスパースなグリッド
///
/// 座標は1始まりです（1行目がヘッダ行）。同じ座標への書き込みは後勝ちで上書きされます。
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    /// シート名
    name: String,

    /// 座標 → セル（行優先順）
    cells: BTreeMap<CellCoord, GridCell>,
}

impl SheetGrid {
    /// 空のグリッドを生成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// シート名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// シート名を変更
    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// セルを書き込む
    pub(crate) fn set(&mut self, coord: CellCoord, value: CellValue, style: CellStyle) {
        debug_assert!(coord.row >= 1 && coord.col >= 1, "grid coordinates are 1-based");
        self.cells.insert(coord, GridCell { value, style });
    }

    /// 指定座標のセルを取得
    pub fn get(&self, row: u32, col: u16) -> Option<&GridCell> {
        self.cells.get(&CellCoord::new(row, col))
    }

    /// 指定座標の値を取得
    pub fn value(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.get(row, col).map(|cell| &cell.value)
    }

    /// 指定行のセル（列順）
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u16, &GridCell)> {
        self.cells
            .range(CellCoord::new(row, 0)..=CellCoord::new(row, u16::MAX))
            .map(|(coord, cell)| (coord.col, cell))
    }

    /// 使用されている最大の行番号（空の場合は0）
    pub fn last_row(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |coord| coord.row)
    }

    /// 書き込まれたセルの数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// セルが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// すべてのセル（行優先順）
    pub fn iter(&self) -> btree_map::Iter<'_, CellCoord, GridCell> {
        self.cells.iter()
    }

    /// ワークシートへ書き出す
    ///
    /// # 引数
    ///
    /// * `worksheet` - 出力先のワークシート
    /// * `formats` - ヘッダ行・データ行の書式
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 書き出しに成功した場合
    /// * `Err(TcXlsxError)` - 座標がExcelの上限を超えた場合など
    pub(crate) fn render_xlsx(
        &self,
        worksheet: &mut Worksheet,
        formats: &CellFormats,
    ) -> Result<(), TcXlsxError> {
        for (coord, cell) in &self.cells {
            // rust_xlsxwriterの座標は0始まり
            let row = coord.row.saturating_sub(1);
            let col = coord.col.saturating_sub(1);
            let format = formats.for_style(cell.style);

            match &cell.value {
                CellValue::String(s) => {
                    worksheet.write_string_with_format(row, col, s, format)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row, col, *n, format)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean_with_format(row, col, *b, format)?;
                }
                CellValue::Empty => {
                    worksheet.write_blank(row, col, format)?;
                }
            }
        }

        Ok(())
    }
}

/// ワークシート書き出し時に使用する書式
#[derive(Debug, Clone)]
pub(crate) struct CellFormats {
    header: Format,
    body: Format,
}

impl CellFormats {
    /// 書式を生成
    ///
    /// すべてのセルに黒の細線罫線を引き、ヘッダ行は指定色で塗りつぶします。
    pub fn new(header_color: u32) -> Self {
        let body = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::Black);
        let header = body
            .clone()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(header_color));

        Self { header, body }
    }

    /// 書式の種類に対応する書式を取得
    pub fn for_style(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Body => &self.body,
        }
    }
}
