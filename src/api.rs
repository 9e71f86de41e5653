//! Public API Types
//!
//! 公開APIで使用する列挙型と既定の設定データを定義するモジュール。

/// シート選択方式
///
/// 抽出対象のシートを選択する方法を指定します。
/// スキップ対象シート（`with_skip_sheets`）は、選択後にさらに除外されます。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートを対象にする（デフォルト）
    All,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Savings".to_string())`
    Name(String),

    /// 複数のインデックス指定
    ///
    /// 例: `SheetSelector::Indices(vec![0, 2, 4])`
    Indices(Vec<usize>),

    /// 複数のシート名指定
    Names(Vec<String>),
}

/// 出力フォーマット
///
/// 抽出したQ&Aペアの書き出し形式を指定します。
/// 3つの形式はすべて同じQ&Aコレクションから生成され、レコード数は常に一致します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 人間が読むためのJSON配列（インデント2）
    ///
    /// # 出力例
    ///
    /// ```json
    /// [
    ///   {
    ///     "question": "What is the minimum balance?",
    ///     "answer": "PKR 5,000 for savings accounts.",
    ///     "product": "Savings Account",
    ///     "sheet": "Savings"
    ///   }
    /// ]
    /// ```
    AllPairs,

    /// Instruction-tuning形式（1行1レコードのJSONL）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {"instruction":"What is the minimum balance?","input":"","output":"PKR 5,000 for savings accounts.","product":"Savings Account"}
    /// ```
    Instruction,

    /// 会話形式（1行1レコードのJSONL、system/user/assistantの3ターン）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {"messages":[{"role":"system","content":"..."},{"role":"user","content":"..."},{"role":"assistant","content":"..."}]}
    /// ```
    Chat,
}

impl OutputFormat {
    /// この形式の既定の出力ファイル名
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputFormat::AllPairs => "all_qa_pairs.json",
            OutputFormat::Instruction => "finetuning_data.jsonl",
            OutputFormat::Chat => "finetuning_data_chat.jsonl",
        }
    }

    /// すべての出力形式
    pub fn all() -> [OutputFormat; 3] {
        [
            OutputFormat::AllPairs,
            OutputFormat::Instruction,
            OutputFormat::Chat,
        ]
    }
}

/// 抽出対象から除外するシート名（索引・レートシート・空シート）
pub const DEFAULT_SKIP_SHEETS: &[&str] = &["Main", "Rate Sheet July 1 2024", "Sheet1"];

/// ナビゲーション用のセンチネルラベル（大文字小文字を区別しない）
pub const DEFAULT_SENTINEL_LABELS: &[&str] = &["main"];

/// 数式セルを示す先頭文字
pub const DEFAULT_FORMULA_MARKER: char = '=';

/// 同一行の複数セルを連結する区切り文字
pub const DEFAULT_ROW_SEPARATOR: &str = " | ";

/// 質問行と判定する先頭フレーズ（小文字で比較）
///
/// シートの実データから導出したリストです。要素を変更すると
/// 曖昧な行の分割結果が変わります。
pub const DEFAULT_QUESTION_PREFIXES: &[&str] = &[
    "what",
    "how",
    "is ",
    "is\n",
    "can ",
    "can\n",
    "does",
    "do ",
    "are ",
    "which",
    "who",
    "where",
    "when",
    "why",
    "i would like to",
    "i want to",
    "please tell",
    "1.",
    "1 .",
    "1-",
];

/// 疑問符を探す先頭からの文字数
pub const DEFAULT_QUESTION_MARK_WINDOW: usize = 80;

/// 外部FAQ由来レコードのシートラベル
pub const DEFAULT_FAQ_SOURCE: &str = "funds_transfer_app_features_faq.json";

/// 会話形式出力のsystemターン
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful customer support assistant for NUST Bank. \
Answer the customer's question accurately and concisely using \
the bank's product knowledge.";
