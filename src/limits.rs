//! Input Limits Module
//!
//! 入力ドキュメントに対する制限を実装するモジュール。
//! 入力ファイルサイズの上限、シート名の検証、階層の深さの検証を提供します。

use crate::columns::Field;
use crate::document::Document;
use crate::error::TcXlsxError;

/// Excelのシート名の最大文字数
pub(crate) const MAX_SHEET_NAME_CHARS: usize = 31;

/// シート名に使用できない文字
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// 入力制限の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLimits {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 64MB (67_108_864 bytes)
    pub max_input_file_size: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_file_size: 67_108_864, // 64MB
        }
    }
}

/// 入力ファイルサイズの検証
pub(crate) fn check_input_size(
    source_name: &str,
    size: u64,
    limits: &InputLimits,
) -> Result<(), TcXlsxError> {
    if size > limits.max_input_file_size {
        return Err(TcXlsxError::LimitExceeded(format!(
            "Input '{}' is {} bytes, exceeding the maximum of {} bytes",
            source_name, size, limits.max_input_file_size
        )));
    }
    Ok(())
}

/// シート名の検証
///
/// Excelが受け付けないシート名（空、31文字超、禁止文字、先頭・末尾のアポストロフィ）を拒否します。
///
/// # 戻り値
///
/// * `Ok(())` - シート名が有効な場合
/// * `Err(String)` - シート名が無効な場合（理由を含む）
pub(crate) fn validate_sheet_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Sheet name must not be empty".to_string());
    }

    if name.chars().count() > MAX_SHEET_NAME_CHARS {
        return Err(format!(
            "Sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_CHARS
        ));
    }

    if let Some(ch) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(format!(
            "Sheet name '{}' contains forbidden character '{}'",
            name, ch
        ));
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(format!(
            "Sheet name '{}' must not start or end with an apostrophe",
            name
        ));
    }

    Ok(())
}

/// 重複しないシート名を決定
///
/// `name`が既存のシート名（大文字小文字を区別しない）と重複する場合、
/// `name`に続く数字の最大値 + 1 を末尾に付けた名前を返します（`S` → `S1`、`S1`もあれば `S2`）。
/// 31文字を超える場合は元の名前の末尾を切り詰めます。
pub(crate) fn unique_sheet_name(existing: &[String], name: &str) -> String {
    let is_taken = |candidate: &str| {
        let candidate = candidate.to_lowercase();
        existing.iter().any(|n| n.to_lowercase() == candidate)
    };

    if !is_taken(name) {
        return name.to_string();
    }

    let lower = name.to_lowercase();
    let highest = existing
        .iter()
        .filter_map(|n| {
            let n = n.to_lowercase();
            let suffix = n.strip_prefix(lower.as_str())?;
            if suffix.is_empty() {
                Some(0)
            } else if suffix.chars().all(|c| c.is_ascii_digit()) {
                suffix.parse::<u32>().ok()
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0);

    let mut counter = highest.saturating_add(1);
    loop {
        let suffix = counter.to_string();
        let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.len());
        let base: String = name.chars().take(keep).collect();
        let candidate = format!("{}{}", base, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter = counter.saturating_add(1);
    }
}

/// 階層の深さの検証
///
/// 大項目・中項目・小項目の3列を超えて階層項目が並ぶドキュメントを拒否します。
/// 超過した階層はそのままでは概要列以降に書き込まれてしまうため、厳格モードでのみ使用します。
pub(crate) fn check_hierarchy_depth(document: &Document) -> Result<(), TcXlsxError> {
    let depth = document.hierarchy_depth();
    if depth > Field::HIERARCHY.len() {
        return Err(TcXlsxError::LimitExceeded(format!(
            "Document '{}' nests {} hierarchy levels, but only {} are available",
            document.source_name(),
            depth,
            Field::HIERARCHY.len()
        )));
    }
    Ok(())
}
