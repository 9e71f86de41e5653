//! Record Emitter Module
//!
//! 空白の正規化と、出典情報付きの`QaPair`生成を行うモジュール。

use std::sync::OnceLock;

use regex::Regex;

use crate::types::QaPair;

/// 改行以外の連続する空白
fn inline_whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("static regex"))
}

/// 3つ以上連続する改行
fn blank_lines_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("static regex"))
}

/// テキストの空白を正規化する
///
/// 1. 前後の空白を除去
/// 2. タブを空白1つに置換
/// 3. 改行以外の連続する空白を空白1つに縮約
/// 4. 3つ以上連続する改行を2つに縮約
/// 5. 再度前後の空白を除去
///
/// # 使用例
///
/// ```rust
/// use xlsxqa::normalize_text;
///
/// assert_eq!(normalize_text("  Free\t debit   card \n\n\n\nApply now "), "Free debit card \n\nApply now");
/// ```
pub fn normalize_text(text: &str) -> String {
    let text = text.trim().replace('\t', " ");
    let text = inline_whitespace_re().replace_all(&text, " ");
    let text = blank_lines_re().replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// 1シート分の出典情報を持ち、`QaPair`を組み立てる
#[derive(Debug, Clone)]
pub struct RecordEmitter {
    product: String,
    sheet: String,
}

impl RecordEmitter {
    pub fn new(product: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            sheet: sheet.into(),
        }
    }

    /// 出典の商品名
    pub fn product(&self) -> &str {
        &self.product
    }

    /// 出典のシート名
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// 質問と回答を正規化して`QaPair`を生成する
    ///
    /// 正規化後にどちらかが空になる場合は`None`を返します。
    pub fn emit(&self, question: &str, answer: &str) -> Option<QaPair> {
        let question = normalize_text(question);
        let answer = normalize_text(answer);
        if question.is_empty() || answer.is_empty() {
            return None;
        }

        Some(QaPair {
            question,
            answer,
            product: self.product.clone(),
            sheet: self.sheet.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses_spaces() {
        assert_eq!(normalize_text("  a  b\t\tc  "), "a b c");
        assert_eq!(normalize_text("a \u{a0} b"), "a b");
    }

    #[test]
    fn test_normalize_keeps_single_and_double_newlines() {
        assert_eq!(normalize_text("a\nb"), "a\nb");
        assert_eq!(normalize_text("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_collapses_three_or_more_newlines() {
        assert_eq!(normalize_text("a\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_text("a\n\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_spaces_between_newlines_survive() {
        // 改行の間の空白は1つに縮約されるが、改行としては連続しない
        assert_eq!(normalize_text("a\n  \n \nb"), "a\n \n \nb");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\n\n "), "");
    }

    #[test]
    fn test_emit_attaches_provenance() {
        let emitter = RecordEmitter::new("Savings Account", "Savings");
        let pair = emitter.emit(" What is X? ", "X\tis  Y.").unwrap();
        assert_eq!(pair.question, "What is X?");
        assert_eq!(pair.answer, "X is Y.");
        assert_eq!(pair.product, "Savings Account");
        assert_eq!(pair.sheet, "Savings");
        assert_eq!(pair.product, emitter.product());
        assert_eq!(pair.sheet, emitter.sheet());
    }

    #[test]
    fn test_emit_rejects_empty_after_normalization() {
        let emitter = RecordEmitter::new("P", "S");
        assert!(emitter.emit("What?", " \n\t ").is_none());
        assert!(emitter.emit("   ", "answer").is_none());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_normalize_is_idempotent(text in "[a-z \t\n\r]{0,60}") {
                let once = normalize_text(&text);
                prop_assert_eq!(normalize_text(&once), once);
            }

            #[test]
            fn test_normalize_output_invariants(text in "[a-z \t\n]{0,60}") {
                let out = normalize_text(&text);
                prop_assert!(!out.contains('\t'));
                prop_assert!(!out.contains("  "));
                prop_assert!(!out.contains("\n\n\n"));
                prop_assert_eq!(out.trim(), out.as_str());
            }
        }
    }
}
