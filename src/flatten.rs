//! Flatten Module
//!
//! テストケース木を深さ優先で走査し、番号付き・階層付きの行としてグリッドに展開するモジュール。
//!
//! # 展開規則
//!
//! - 1行目はヘッダ行（14列固定）
//! - トップレベルのスイートごとに、現在の通し番号を1列目、スイート名を2列目（大項目）に書き込む。
//!   スイート行は番号を消費しない
//! - グループのラベルは「3列目 + 入れ子の深さ」の列に書き込み、子ノードは同じ行から続ける
//! - テストケースは、番号を「3列目 + 入れ子の深さ」の列に、各フィールドを対応する列に書き込み、
//!   行と番号を1つ進める

use tracing::{debug, trace};

use crate::api::NumberPlacement;
use crate::columns::{header_captions, Field};
use crate::document::{Case, Document, Node, Suite};
use crate::grid::{CellStyle, SheetGrid};
use crate::types::{CellCoord, CellValue};

/// ヘッダ行の行番号
pub(crate) const HEADER_ROW: u32 = 1;

/// スイート直下のノードを書き込む列（中項目）
const NESTED_BASE_COLUMN: u16 = Field::Middle.column();

/// 走査中の位置
///
/// 行と通し番号はドキュメント全体で共有され、ドキュメントごとに初期化されます。
/// 列は入れ子の深さから求めるため保持しません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    /// 次に書き込む行
    pub row: u32,

    /// 次のテストケースの通し番号
    pub sequence: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: HEADER_ROW + 1,
            sequence: 1,
        }
    }
}

/// テストケース木をグリッドに展開する
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Flattener {
    number_placement: NumberPlacement,
}

impl Flattener {
    pub fn new(number_placement: NumberPlacement) -> Self {
        Self { number_placement }
    }

    /// 1ドキュメントを1シート分のグリッドに展開する
    pub fn flatten_document(&self, document: &Document) -> SheetGrid {
        let mut grid = SheetGrid::new(document.sheet_name());
        write_header(&mut grid);

        let mut cursor = Cursor::default();
        for suite in document.suites() {
            self.write_suite(&mut grid, &mut cursor, suite);
        }

        debug!(
            sheet = document.sheet_name(),
            rows = grid.last_row(),
            cases = cursor.sequence - 1,
            "flattened document"
        );
        grid
    }

    /// トップレベルのスイート（大項目）を書き込む
    fn write_suite(&self, grid: &mut SheetGrid, cursor: &mut Cursor, suite: &Suite) {
        let row = cursor.row;
        grid.set(
            CellCoord::new(row, Field::No.column()),
            CellValue::from(cursor.sequence),
            CellStyle::Body,
        );
        grid.set(
            CellCoord::new(row, Field::Major.column()),
            CellValue::from(suite.name()),
            CellStyle::Body,
        );
        trace!(row, suite = suite.name(), "suite");

        self.flatten_nodes(grid, cursor, suite.nodes(), 0);
    }

    /// ノード列を深さ優先で書き込む
    ///
    /// `depth`はスイート直下を0とした入れ子の深さで、書き込む列は`3 + depth`です。
    fn flatten_nodes(
        &self,
        grid: &mut SheetGrid,
        cursor: &mut Cursor,
        nodes: &[Node],
        depth: u16,
    ) {
        let column = NESTED_BASE_COLUMN.saturating_add(depth);

        for node in nodes {
            match node {
                Node::Case(case) => self.write_case(grid, cursor, column, case),
                Node::Group(group) => {
                    grid.set(
                        CellCoord::new(cursor.row, column),
                        CellValue::from(group.label()),
                        CellStyle::Body,
                    );
                    trace!(row = cursor.row, column, group = group.label(), "group");
                    self.flatten_nodes(
                        grid,
                        cursor,
                        group.children(),
                        depth.saturating_add(1),
                    );
                }
            }
        }
    }

    /// テストケースを1行書き込み、行と通し番号を進める
    fn write_case(&self, grid: &mut SheetGrid, cursor: &mut Cursor, column: u16, case: &Case) {
        let number_column = match self.number_placement {
            NumberPlacement::Cursor => column,
            NumberPlacement::FirstColumn => Field::No.column(),
        };
        grid.set(
            CellCoord::new(cursor.row, number_column),
            CellValue::from(cursor.sequence),
            CellStyle::Body,
        );

        for (field, value) in case.fields() {
            grid.set(
                CellCoord::new(cursor.row, field.column()),
                value.clone(),
                CellStyle::Body,
            );
        }
        trace!(row = cursor.row, number = cursor.sequence, "case");

        cursor.row += 1;
        cursor.sequence += 1;
    }
}

/// ヘッダ行を書き込む
pub(crate) fn write_header(grid: &mut SheetGrid) {
    for (caption, field) in header_captions().zip(Field::ALL) {
        grid.set(
            CellCoord::new(HEADER_ROW, field.column()),
            CellValue::from(caption),
            CellStyle::Header,
        );
    }
}
