//! Output Format Module
//!
//! Strategy PatternによるQ&A出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::OutputFormat;
use crate::error::XlsxQaError;
use crate::types::QaPair;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（全件JSON, Instruction JSONL, Chat JSONL）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    AllPairs,
    Instruction,
    Chat,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::AllPairs => OutputFormatter::AllPairs,
            OutputFormat::Instruction => OutputFormatter::Instruction,
            OutputFormat::Chat => OutputFormatter::Chat,
        }
    }

    /// Q&Aペアを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `pairs` - 出力するQ&Aペア
    /// * `writer` - 出力先のライター
    /// * `system_prompt` - 会話形式のsystemターン（Chat形式でのみ使用）
    pub fn render<W: Write>(
        &self,
        pairs: &[QaPair],
        writer: &mut W,
        system_prompt: &str,
    ) -> Result<(), XlsxQaError> {
        match self {
            OutputFormatter::AllPairs => AllPairsFormatter.render(pairs, writer),
            OutputFormatter::Instruction => InstructionFormatter.render(pairs, writer),
            OutputFormatter::Chat => ChatFormatter::new(system_prompt).render(pairs, writer),
        }
    }
}
