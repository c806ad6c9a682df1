//! Document Module
//!
//! 入力ドキュメント（YAML/JSON）を読み込み、テストケース木の型付きモデルに変換するモジュール。
//!
//! 入力ドキュメントは次の形のマッピングです。
//!
//! ```yaml
//! sheet_name: ログイン
//! 画面表示:                      # 大項目（トップレベルのスイート）
//!   - description: 初期表示      # テストケース（description を持つマッピング）
//!     procedure: URLを開く
//!   - 入力チェック:              # グループ（ラベル1つ → 子ノードのリスト）
//!       - description: 空欄で送信
//! ```

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::api::InputFormat;
use crate::columns::Field;
use crate::error::TcXlsxError;
use crate::limits::{check_input_size, validate_sheet_name, InputLimits};
use crate::types::CellValue;

/// シート名を指定するトップレベルのキー
pub const SHEET_NAME_KEY: &str = "sheet_name";

/// 1つの入力ファイルから読み込んだドキュメント
///
/// 出力ワークブックの1シートに対応します。
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    sheet_name: String,
    source_name: String,
    suites: Vec<Suite>,
}

impl Document {
    /// 空のドキュメントを生成
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            source_name: "<memory>".to_string(),
            suites: Vec::new(),
        }
    }

    /// 入力元の名前を設定（エラーメッセージとログで使用）
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    /// トップレベルのスイートを追加
    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.suites.push(suite);
        self
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// トップレベルのスイート（入力順）
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// ドキュメント内のテストケースの総数
    pub fn case_count(&self) -> usize {
        self.suites
            .iter()
            .flat_map(|suite| suite.nodes())
            .map(Node::case_count)
            .sum()
    }

    /// 使用する階層項目の列数
    ///
    /// スイートのみなら1（大項目）、グループが1段入れ子になると2（中項目）、以降同様です。
    /// スイートがない場合は0です。
    pub fn hierarchy_depth(&self) -> usize {
        self.suites
            .iter()
            .map(|suite| 1 + suite.nodes().iter().map(Node::depth).max().unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    /// YAML文字列からドキュメントを読み込む
    ///
    /// # 引数
    ///
    /// * `text` - YAMLテキスト
    /// * `source_name` - 入力元の名前（エラーメッセージに使用）
    pub fn from_yaml_str(text: &str, source_name: &str) -> Result<Self, TcXlsxError> {
        let mut value: Value = serde_yaml::from_str(text)?;
        // マージキー（`<<: *anchor`）を展開
        value.apply_merge()?;
        Self::from_value(value, source_name)
    }

    /// JSON文字列からドキュメントを読み込む
    ///
    /// キーの順序はYAMLと同様に入力順が保持されます。
    pub fn from_json_str(text: &str, source_name: &str) -> Result<Self, TcXlsxError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value, source_name)
    }

    /// 解析済みの値からドキュメントを構築する
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, TcXlsxError> {
        DocumentParser { source_name }.parse_document(value)
    }

    /// ファイルからドキュメントを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(Document)` - 読み込みに成功した場合
    /// * `Err(TcXlsxError)` - ファイルが存在しない、サイズ上限を超える、
    ///   構文解析に失敗した、またはテストケース木の形式が不正な場合
    pub fn load<P: AsRef<Path>>(
        path: P,
        format: InputFormat,
        limits: &InputLimits,
    ) -> Result<Self, TcXlsxError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let size = fs::metadata(path)?.len();
        check_input_size(&source_name, size, limits)?;

        info!(path = %source_name, ?format, "loading document");
        let text = fs::read_to_string(path)?;

        let document = match format {
            InputFormat::Yaml => Self::from_yaml_str(&text, &source_name)?,
            InputFormat::Json => Self::from_json_str(&text, &source_name)?,
        };

        debug!(
            sheet = document.sheet_name(),
            suites = document.suites().len(),
            cases = document.case_count(),
            "loaded document"
        );
        Ok(document)
    }
}

/// 複数の入力ファイルを順に読み込む
///
/// 1つでも失敗した場合はその時点でエラーを返します。
pub fn load_documents<I, P>(
    paths: I,
    format: InputFormat,
    limits: &InputLimits,
) -> Result<Vec<Document>, TcXlsxError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| Document::load(path, format, limits))
        .collect()
}

/// トップレベルのスイート（大項目）
#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    name: String,
    nodes: Vec<Node>,
}

impl Suite {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// テストケース木のノード
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// テストケース（1行に展開される）
    Case(Case),
    /// ラベル付きのグループ（子ノードを持つ）
    Group(Group),
}

impl Node {
    /// このノード以下のテストケース数
    pub fn case_count(&self) -> usize {
        match self {
            Node::Case(_) => 1,
            Node::Group(group) => group.children().iter().map(Node::case_count).sum(),
        }
    }

    /// このノード以下のグループの入れ子の深さ（ケースは0）
    pub fn depth(&self) -> usize {
        match self {
            Node::Case(_) => 0,
            Node::Group(group) => {
                1 + group
                    .children()
                    .iter()
                    .map(Node::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

/// ラベルと子ノードを持つグループ
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    label: String,
    children: Vec<Node>,
}

impl Group {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// 1件のテストケース
///
/// フィールドは入力順に保持されます。存在しないフィールドの列は空欄になります。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Case {
    fields: Vec<(Field, CellValue)>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加
    pub fn with(mut self, field: Field, value: impl Into<CellValue>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    /// フィールドと値（入力順）
    pub fn fields(&self) -> &[(Field, CellValue)] {
        &self.fields
    }

    /// 指定フィールドの値を取得
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }
}

/// 値の木を`Document`に変換するパーサー（内部用）
struct DocumentParser<'a> {
    source_name: &'a str,
}

impl DocumentParser<'_> {
    fn parse_document(&self, value: Value) -> Result<Document, TcXlsxError> {
        let Value::Mapping(mapping) = value else {
            return Err(self.invalid_document("top level must be a mapping"));
        };

        let mut sheet_name = None;
        let mut suites = Vec::new();

        for (key, value) in mapping {
            let name = scalar_label(&key)
                .ok_or_else(|| self.invalid_document("top-level keys must be scalars"))?;

            if name == SHEET_NAME_KEY {
                let name = scalar_label(&value)
                    .ok_or_else(|| self.invalid_document("'sheet_name' must be a scalar"))?;
                validate_sheet_name(&name).map_err(|message| self.invalid_document(&message))?;
                sheet_name = Some(name);
                continue;
            }

            let children = child_sequence(value).ok_or_else(|| {
                self.invalid_document(&format!("suite '{}' must be a list", name))
            })?;
            let nodes = self.parse_nodes(children)?;
            suites.push(Suite::new(name, nodes));
        }

        let sheet_name = sheet_name.ok_or_else(|| TcXlsxError::MissingSheetName {
            source_name: self.source_name.to_string(),
        })?;

        Ok(Document {
            sheet_name,
            source_name: self.source_name.to_string(),
            suites,
        })
    }

    fn parse_nodes(&self, values: Vec<Value>) -> Result<Vec<Node>, TcXlsxError> {
        values
            .into_iter()
            .map(|value| self.parse_node(value))
            .collect()
    }

    fn parse_node(&self, value: Value) -> Result<Node, TcXlsxError> {
        let Value::Mapping(mapping) = value else {
            return Err(self.invalid_document("every list entry must be a mapping"));
        };

        let is_case = mapping.contains_key(Field::Description.key());
        if is_case {
            Ok(Node::Case(self.parse_case(mapping)?))
        } else {
            Ok(Node::Group(self.parse_group(mapping)?))
        }
    }

    fn parse_case(&self, mapping: Mapping) -> Result<Case, TcXlsxError> {
        let mut case = Case::new();
        for (key, value) in mapping {
            let key = scalar_label(&key).unwrap_or_else(|| format!("{:?}", key));
            let field = Field::from_key(&key).ok_or_else(|| TcXlsxError::UnknownField {
                source_name: self.source_name.to_string(),
                field: key.clone(),
            })?;
            let value = scalar_value(value).ok_or_else(|| TcXlsxError::InvalidValue {
                source_name: self.source_name.to_string(),
                field: key.clone(),
            })?;
            case.fields.push((field, value));
        }
        Ok(case)
    }

    fn parse_group(&self, mapping: Mapping) -> Result<Group, TcXlsxError> {
        if mapping.len() != 1 {
            let labels: Vec<String> = mapping.keys().filter_map(scalar_label).collect();
            return Err(self.invalid_group(format!(
                "a group must have exactly one label, found {} ({})",
                mapping.len(),
                labels.join(", ")
            )));
        }

        let Some((key, value)) = mapping.into_iter().next() else {
            return Err(self.invalid_group("a group must have exactly one label".to_string()));
        };

        let label = scalar_label(&key)
            .ok_or_else(|| self.invalid_group("group labels must be scalars".to_string()))?;
        let children = child_sequence(value)
            .ok_or_else(|| self.invalid_group(format!("group '{}' must contain a list", label)))?;

        Ok(Group::new(label, self.parse_nodes(children)?))
    }

    fn invalid_document(&self, message: &str) -> TcXlsxError {
        TcXlsxError::InvalidDocument {
            source_name: self.source_name.to_string(),
            message: message.to_string(),
        }
    }

    fn invalid_group(&self, message: String) -> TcXlsxError {
        TcXlsxError::InvalidGroup {
            source_name: self.source_name.to_string(),
            message,
        }
    }
}

/// キーやラベルとして使えるスカラー値を文字列に変換
fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 子ノードのリストを取り出す（nullは空リストとして扱う）
fn child_sequence(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Sequence(values) => Some(values),
        Value::Null => Some(Vec::new()),
        _ => None,
    }
}

/// フィールド値をセル値に変換（スカラー以外は`None`）
fn scalar_value(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Empty),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::String(s)),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
