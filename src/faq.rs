//! External FAQ Module
//!
//! カテゴリごとに質問/回答を持つ外部FAQ文書（JSON）を読み込み、
//! `QaPair`として取り込むモジュール。

use std::io::Read;

use serde::Deserialize;
use tracing::warn;

use crate::emit::RecordEmitter;
use crate::error::XlsxQaError;
use crate::security::{read_limited, SecurityConfig};
use crate::types::QaPair;

/// カテゴリ名が無い場合の既定値
const DEFAULT_CATEGORY: &str = "General";

/// 外部FAQ文書
///
/// ```json
/// {
///   "categories": [
///     { "category": "Transfers", "questions": [ { "question": "...", "answer": "..." } ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FaqDocument {
    #[serde(default)]
    pub categories: Vec<FaqCategory>,
}

/// FAQのカテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqCategory {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub questions: Vec<FaqEntry>,
}

/// FAQの1項目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl FaqDocument {
    /// リーダーからFAQ文書を読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(FaqDocument)` - 読み込みに成功した場合
    /// * `Err(XlsxQaError::Json)` - JSONとして不正な場合
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, XlsxQaError> {
        let limit = SecurityConfig::default().max_faq_file_size;
        let buffer = read_limited(reader, limit, "FAQ document")?;
        Ok(serde_json::from_slice(&buffer)?)
    }

    /// 全カテゴリの項目数
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// FAQ項目を`QaPair`に変換する
    ///
    /// 商品名は`Mobile App – {カテゴリ名}`、シート名は`source`になります。
    /// 正規化後に質問か回答が空になる項目は取り込みません。
    pub fn to_pairs(&self, source: &str) -> Vec<QaPair> {
        let mut pairs = Vec::with_capacity(self.entry_count());
        for category in &self.categories {
            let emitter = RecordEmitter::new(format!("Mobile App – {}", category.category), source);
            for entry in &category.questions {
                match emitter.emit(&entry.question, &entry.answer) {
                    Some(pair) => pairs.push(pair),
                    None => warn!(
                        category = %category.category,
                        question = %entry.question,
                        "skipping FAQ entry with empty question or answer"
                    ),
                }
            }
        }
        pairs
    }
}
