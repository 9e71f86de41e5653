//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use serde::Serialize;
use std::io::Write;

use crate::error::XlsxQaError;
use crate::types::QaPair;

/// 全件を人間が読める整形済みJSON配列として出力するフォーマッター
pub struct AllPairsFormatter;

impl AllPairsFormatter {
    pub fn render<W: Write>(&self, pairs: &[QaPair], writer: &mut W) -> Result<(), XlsxQaError> {
        serde_json::to_writer_pretty(&mut *writer, pairs)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Instruction-tuning形式の1レコード
#[derive(Debug, Serialize)]
struct InstructionRecord<'a> {
    instruction: &'a str,
    input: &'a str,
    output: &'a str,
    product: &'a str,
}

/// Instruction-tuning形式（JSONL）のフォーマッター
pub struct InstructionFormatter;

impl InstructionFormatter {
    pub fn render<W: Write>(&self, pairs: &[QaPair], writer: &mut W) -> Result<(), XlsxQaError> {
        for pair in pairs {
            let record = InstructionRecord {
                instruction: &pair.question,
                input: "",
                output: &pair.answer,
                product: &pair.product,
            };
            write_json_line(writer, &record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// 会話形式の1ターン
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// 会話形式の1レコード
#[derive(Debug, Serialize)]
struct ChatRecord<'a> {
    messages: [ChatMessage<'a>; 3],
}

/// 会話形式（JSONL、system/user/assistant）のフォーマッター
pub struct ChatFormatter<'a> {
    system_prompt: &'a str,
}

impl<'a> ChatFormatter<'a> {
    pub fn new(system_prompt: &'a str) -> Self {
        Self { system_prompt }
    }

    pub fn render<W: Write>(&self, pairs: &[QaPair], writer: &mut W) -> Result<(), XlsxQaError> {
        for pair in pairs {
            let record = ChatRecord {
                messages: [
                    ChatMessage {
                        role: "system",
                        content: self.system_prompt,
                    },
                    ChatMessage {
                        role: "user",
                        content: &pair.question,
                    },
                    ChatMessage {
                        role: "assistant",
                        content: &pair.answer,
                    },
                ],
            };
            write_json_line(writer, &record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// 1レコードを1行のJSONとして書き出す
fn write_json_line<W: Write, T: Serialize>(writer: &mut W, record: &T) -> Result<(), XlsxQaError> {
    serde_json::to_writer(&mut *writer, record)?;
    writeln!(writer)?;
    Ok(())
}
