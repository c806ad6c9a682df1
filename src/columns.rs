//! Column Mapping Module
//!
//! テスト仕様書シートの固定14列と、テストケースのフィールド名との対応表を定義するモジュール。

/// 出力シートの列数
pub const COLUMN_COUNT: usize = 14;

/// テスト仕様書の1列に対応するフィールド
///
/// 列番号は1始まりで、`Field::ALL`の並び順と一致します。
/// `No`と3つの階層項目（大項目・中項目・小項目）も、テストケース側から
/// 直接値を指定できるフィールドとして扱います。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// 通し番号（No）
    No,
    /// 大項目
    Major,
    /// 中項目
    Middle,
    /// 小項目
    Minor,
    /// 概要（`description`）
    Description,
    /// 手順（`procedure`）
    Procedure,
    /// 期待値（`expected_value`）
    ExpectedValue,
    /// カテゴリ（`category`）
    Category,
    /// 結果（`result`）
    TestResult,
    /// 作業者（`operator`）
    Operator,
    /// 作業日（`operate_day`）
    OperateDay,
    /// 確認者（`verifier`）
    Verifier,
    /// 確認日（`verify_day`）
    VerifyDay,
    /// 備考（`comment`）
    Comment,
}

impl Field {
    /// 全フィールド（列順）
    pub const ALL: [Field; COLUMN_COUNT] = [
        Field::No,
        Field::Major,
        Field::Middle,
        Field::Minor,
        Field::Description,
        Field::Procedure,
        Field::ExpectedValue,
        Field::Category,
        Field::TestResult,
        Field::Operator,
        Field::OperateDay,
        Field::Verifier,
        Field::VerifyDay,
        Field::Comment,
    ];

    /// 階層項目の列（大項目・中項目・小項目）
    pub const HIERARCHY: [Field; 3] = [Field::Major, Field::Middle, Field::Minor];

    /// 列番号（1始まり）
    pub const fn column(self) -> u16 {
        match self {
            Field::No => 1,
            Field::Major => 2,
            Field::Middle => 3,
            Field::Minor => 4,
            Field::Description => 5,
            Field::Procedure => 6,
            Field::ExpectedValue => 7,
            Field::Category => 8,
            Field::TestResult => 9,
            Field::Operator => 10,
            Field::OperateDay => 11,
            Field::Verifier => 12,
            Field::VerifyDay => 13,
            Field::Comment => 14,
        }
    }

    /// ヘッダ行に表示する見出し
    pub const fn header(self) -> &'static str {
        match self {
            Field::No => "No",
            Field::Major => "大項目",
            Field::Middle => "中項目",
            Field::Minor => "小項目",
            Field::Description => "概要",
            Field::Procedure => "手順",
            Field::ExpectedValue => "期待値",
            Field::Category => "カテゴリ",
            Field::TestResult => "結果",
            Field::Operator => "作業者",
            Field::OperateDay => "作業日",
            Field::Verifier => "確認者",
            Field::VerifyDay => "確認日",
            Field::Comment => "備考",
        }
    }

    /// 入力ドキュメント上のキー名
    pub const fn key(self) -> &'static str {
        match self {
            Field::No => "No",
            Field::Major => "大項目",
            Field::Middle => "中項目",
            Field::Minor => "小項目",
            Field::Description => "description",
            Field::Procedure => "procedure",
            Field::ExpectedValue => "expected_value",
            Field::Category => "category",
            Field::TestResult => "result",
            Field::Operator => "operator",
            Field::OperateDay => "operate_day",
            Field::Verifier => "verifier",
            Field::VerifyDay => "verify_day",
            Field::Comment => "comment",
        }
    }

    /// キー名からフィールドを引く
    ///
    /// 列マッピングに存在しないキーの場合は`None`を返します。
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// ヘッダ行の見出し一覧（列順）
pub fn header_captions() -> impl Iterator<Item = &'static str> {
    Field::ALL.into_iter().map(Field::header)
}
