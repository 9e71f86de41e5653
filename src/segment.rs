//! Segmenter Module
//!
//! 行テキストの列を質問/回答に分類し、Q&Aペアへまとめるモジュール。
//!
//! 分類はヒューリスティック（`QuestionClassifier`）で行い、まとめ方は
//! 2状態のステートマシン（`SegmentState`）で表現します。
//!
//! - 最初の質問より前に現れた回答行は導入文として捨てられる
//! - 回答を1行も持たない質問は、次の質問またはシート末尾で捨てられる

use tracing::trace;

use crate::emit::{normalize_text, RecordEmitter};
use crate::types::{QaPair, RowUnit};

/// 行テキストの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Question,
    Answer,
}

/// 質問判定ヒューリスティック
///
/// トリム済みテキストが次のいずれかを満たす場合に質問と判定します。
///
/// 1. `?`で終わる
/// 2. 小文字化した先頭が、設定されたフレーズのいずれかに一致する
/// 3. 先頭`question_mark_window`文字以内に`?`を含む（セル結合で崩れた文への対策）
///
/// 空文字列は常に回答扱いです。入力テキストのみに依存する純粋関数です。
#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    prefixes: Vec<String>,
    question_mark_window: usize,
}

impl QuestionClassifier {
    pub fn new<I, S>(prefixes: I, question_mark_window: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            question_mark_window,
        }
    }

    /// 質問行かどうかを判定する
    pub fn is_question(&self, text: &str) -> bool {
        let t = text.trim();
        if t.is_empty() {
            return false;
        }
        if t.ends_with('?') {
            return true;
        }

        let lower = t.to_lowercase();
        if self.prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            return true;
        }

        t.chars().take(self.question_mark_window).any(|c| c == '?')
    }

    pub fn classify(&self, text: &str) -> RowKind {
        if self.is_question(text) {
            RowKind::Question
        } else {
            RowKind::Answer
        }
    }
}

impl Default for QuestionClassifier {
    fn default() -> Self {
        Self::new(
            crate::api::DEFAULT_QUESTION_PREFIXES.iter().copied(),
            crate::api::DEFAULT_QUESTION_MARK_WINDOW,
        )
    }
}

/// 分割処理の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentState {
    /// まだ質問が現れていない
    AwaitingQuestion,
    /// 質問が保留中で、回答行を蓄積している
    AccumulatingAnswer { question: String, parts: Vec<String> },
}

/// 1シート分のQ&A分割ステートマシン
///
/// シートごとに生成し、処理後は破棄します。
#[derive(Debug)]
pub struct Segmenter<'a> {
    classifier: &'a QuestionClassifier,
    emitter: RecordEmitter,
    state: SegmentState,
    pairs: Vec<QaPair>,
}

impl<'a> Segmenter<'a> {
    pub fn new(classifier: &'a QuestionClassifier, emitter: RecordEmitter) -> Self {
        Self {
            classifier,
            emitter,
            state: SegmentState::AwaitingQuestion,
            pairs: Vec::new(),
        }
    }

    /// 現在の状態
    pub fn state(&self) -> &SegmentState {
        &self.state
    }

    /// 1行分のテキストを処理する
    pub fn push(&mut self, raw: &str) {
        let text = normalize_text(raw);
        if text.is_empty() {
            return;
        }

        match self.classifier.classify(&text) {
            RowKind::Question => {
                let previous = std::mem::replace(
                    &mut self.state,
                    SegmentState::AccumulatingAnswer {
                        question: text,
                        parts: Vec::new(),
                    },
                );
                self.finish(previous);
            }
            RowKind::Answer => match &mut self.state {
                SegmentState::AccumulatingAnswer { parts, .. } => parts.push(text),
                SegmentState::AwaitingQuestion => {
                    trace!(
                        sheet = self.emitter.sheet(),
                        product = self.emitter.product(),
                        text = %text,
                        "dropping answer text before first question"
                    );
                }
            },
        }
    }

    /// 保留中の質問を確定し、蓄積したペアを返す
    pub fn finish_sheet(mut self) -> Vec<QaPair> {
        let last = std::mem::replace(&mut self.state, SegmentState::AwaitingQuestion);
        self.finish(last);
        self.pairs
    }

    fn finish(&mut self, state: SegmentState) {
        match state {
            SegmentState::AwaitingQuestion => {}
            SegmentState::AccumulatingAnswer { question, parts } if parts.is_empty() => {
                trace!(
                    sheet = self.emitter.sheet(),
                    product = self.emitter.product(),
                    question = %question,
                    "dropping question without answer"
                );
            }
            SegmentState::AccumulatingAnswer { question, parts } => {
                if let Some(pair) = self.emitter.emit(&question, &parts.join("\n")) {
                    self.pairs.push(pair);
                }
            }
        }
    }
}

/// `RowUnit`の列をQ&Aペアに分割する
pub fn segment_rows(
    classifier: &QuestionClassifier,
    emitter: RecordEmitter,
    rows: &[RowUnit],
) -> Vec<QaPair> {
    let mut segmenter = Segmenter::new(classifier, emitter);
    for row in rows {
        segmenter.push(&row.text);
    }
    segmenter.finish_sheet()
}
