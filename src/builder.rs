//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use std::collections::HashSet;
use std::io::{Read, Write};

use tracing::{debug, info};

use crate::api::{
    OutputFormat, SheetSelector, DEFAULT_FAQ_SOURCE, DEFAULT_FORMULA_MARKER,
    DEFAULT_QUESTION_MARK_WINDOW, DEFAULT_QUESTION_PREFIXES, DEFAULT_ROW_SEPARATOR,
    DEFAULT_SENTINEL_LABELS, DEFAULT_SKIP_SHEETS, DEFAULT_SYSTEM_PROMPT,
};
use crate::emit::RecordEmitter;
use crate::error::XlsxQaError;
use crate::faq::FaqDocument;
use crate::flatten::CellFlattener;
use crate::output::OutputFormatter;
use crate::parser::WorkbookParser;
use crate::segment::{segment_rows, QuestionClassifier};
use crate::types::{Cell, ExtractionReport, QaPair, RowUnit, SheetReport};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 抽出対象外のシート名（完全一致）
    pub skip_sheets: Vec<String>,

    /// ナビゲーション用ラベル（大文字小文字を区別しない）
    pub sentinel_labels: Vec<String>,

    /// 数式セルの先頭文字
    pub formula_marker: char,

    /// 同一行セルの区切り文字
    pub row_separator: String,

    /// 質問判定の先頭フレーズ
    pub question_prefixes: Vec<String>,

    /// 疑問符を探す文字数
    pub question_mark_window: usize,

    /// 外部FAQ由来レコードのシートラベル
    pub faq_source: String,

    /// 会話形式出力のsystemターン
    pub system_prompt: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            skip_sheets: to_strings(DEFAULT_SKIP_SHEETS),
            sentinel_labels: to_strings(DEFAULT_SENTINEL_LABELS),
            formula_marker: DEFAULT_FORMULA_MARKER,
            row_separator: DEFAULT_ROW_SEPARATOR.to_string(),
            question_prefixes: to_strings(DEFAULT_QUESTION_PREFIXES),
            question_mark_window: DEFAULT_QUESTION_MARK_WINDOW,
            faq_source: DEFAULT_FAQ_SOURCE.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Fluent Builder APIを提供する構造体
///
/// `Extractor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxqa::{ExtractorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxqa::XlsxQaError> {
/// let extractor = ExtractorBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Savings".to_string()))
///     .with_skip_sheets(["Main", "Rates"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - スキップ対象: `Main`, `Rate Sheet July 1 2024`, `Sheet1`
    /// - センチネルラベル: `main`
    /// - 数式マーカー: `=`
    /// - 行区切り: `" | "`
    /// - 質問判定: 既定のフレーズ20件、疑問符の探索は先頭80文字
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 抽出対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 抽出対象外のシート名を置き換える
    ///
    /// シート名は完全一致で比較します。スキップされたシートからは
    /// Q&Aペアが1件も生成されません。
    pub fn with_skip_sheets<I, S>(mut self, sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.skip_sheets = sheets.into_iter().map(Into::into).collect();
        self
    }

    /// ナビゲーション用のセンチネルラベルを置き換える
    pub fn with_sentinel_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sentinel_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// 数式セルの先頭文字を指定する
    pub fn with_formula_marker(mut self, marker: char) -> Self {
        self.config.formula_marker = marker;
        self
    }

    /// 同一行の複数セルを連結する区切り文字を指定する
    pub fn with_row_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.row_separator = separator.into();
        self
    }

    /// 質問判定に使う先頭フレーズを置き換える
    ///
    /// 比較は小文字化したテキストに対して行うため、フレーズも小文字で指定します。
    pub fn with_question_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.question_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// 疑問符を探す先頭からの文字数を指定する
    pub fn with_question_mark_window(mut self, window: usize) -> Self {
        self.config.question_mark_window = window;
        self
    }

    /// 外部FAQ由来レコードのシートラベルを指定する
    pub fn with_faq_source(mut self, source: impl Into<String>) -> Self {
        self.config.faq_source = source.into();
        self
    }

    /// 会話形式出力のsystemターンを指定する
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxQaError::Config(String)`: 設定の検証に失敗した場合
    ///   * 行区切りが空
    ///   * 質問フレーズが0件、または空のフレーズを含む
    ///   * 疑問符の探索文字数が0
    ///   * systemターンまたはFAQラベルが空
    pub fn build(self) -> Result<Extractor, XlsxQaError> {
        let config = &self.config;

        if config.row_separator.is_empty() {
            return Err(XlsxQaError::Config(
                "Row separator must not be empty".to_string(),
            ));
        }

        if config.question_prefixes.is_empty() {
            return Err(XlsxQaError::Config(
                "At least one question prefix is required".to_string(),
            ));
        }

        if let Some(index) = config.question_prefixes.iter().position(|p| p.is_empty()) {
            return Err(XlsxQaError::Config(format!(
                "Question prefix at index {} is empty",
                index
            )));
        }

        if config.question_mark_window == 0 {
            return Err(XlsxQaError::Config(
                "Question mark window must be greater than zero".to_string(),
            ));
        }

        if config.system_prompt.trim().is_empty() {
            return Err(XlsxQaError::Config(
                "System prompt must not be empty".to_string(),
            ));
        }

        if config.faq_source.trim().is_empty() {
            return Err(XlsxQaError::Config(
                "FAQ source label must not be empty".to_string(),
            ));
        }

        Ok(Extractor::new(self.config))
    }
}

/// 抽出処理のファサード
///
/// ワークブックからQ&Aペアを抽出し、外部FAQとのマージや出力形式への
/// 書き出しを行うメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxqa::{ExtractorBuilder, OutputFormat};
///
/// # fn main() -> Result<(), xlsxqa::XlsxQaError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let report = extractor.extract(File::open("knowledge.xlsx")?)?;
///
/// let output = File::create("finetuning_data.jsonl")?;
/// extractor.render(OutputFormat::Instruction, &report.pairs, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,

    /// セル取捨選択と行連結
    flattener: CellFlattener,

    /// 質問判定
    classifier: QuestionClassifier,

    /// スキップ対象シート
    skip_sheets: HashSet<String>,
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self {
            flattener: CellFlattener::new(
                config.formula_marker,
                &config.sentinel_labels,
                &config.row_separator,
            ),
            classifier: QuestionClassifier::new(
                config.question_prefixes.iter().cloned(),
                config.question_mark_window,
            ),
            skip_sheets: config.skip_sheets.iter().cloned().collect(),
            config,
        }
    }

    /// 質問判定器
    pub fn classifier(&self) -> &QuestionClassifier {
        &self.classifier
    }

    /// スキップ対象のシートかどうか
    pub fn is_skipped_sheet(&self, sheet_name: &str) -> bool {
        self.skip_sheets.contains(sheet_name)
    }

    /// ワークブックからQ&Aペアを抽出する
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブック全体を読み込む（破損していればここでエラー）
    /// 2. シート選択
    /// 3. 各シートについて順番に処理
    ///    - スキップ対象なら何もしない
    ///    - セル抽出 → 行の連結 → Q&A分割
    /// 4. シート順にペアを連結して返す
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExtractionReport)` - 全ペアとシートごとの集計
    /// * `Err(XlsxQaError)` - 入力が読めない、または設定が不正な場合
    pub fn extract<R: Read>(&self, input: R) -> Result<ExtractionReport, XlsxQaError> {
        let mut parser = WorkbookParser::open(input)?;
        let sheet_names = parser.select_sheets(&self.config.sheet_selector)?;

        let mut report = ExtractionReport::default();
        for sheet_name in sheet_names {
            if self.is_skipped_sheet(&sheet_name) {
                debug!(sheet = %sheet_name, "skipping sheet");
                report.sheets.push(SheetReport {
                    sheet: sheet_name,
                    product: None,
                    pairs: 0,
                    skipped: true,
                });
                continue;
            }

            let cells = parser.parse_sheet(&sheet_name)?;
            let (product, pairs) = self.extract_cells(&sheet_name, &cells);
            info!(sheet = %sheet_name, product = %product, pairs = pairs.len(), "extracted sheet");

            report.sheets.push(SheetReport {
                sheet: sheet_name,
                product: Some(product),
                pairs: pairs.len(),
                skipped: false,
            });
            report.pairs.extend(pairs);
        }

        info!(
            total = report.pairs.len(),
            skipped = report.skipped_sheets().len(),
            "extraction finished"
        );
        Ok(report)
    }

    /// 1シート分のセルからQ&Aペアを抽出する
    ///
    /// # 戻り値
    ///
    /// 推定した商品名と、抽出したペアの組
    pub fn extract_cells(&self, sheet_name: &str, cells: &[Cell]) -> (String, Vec<QaPair>) {
        let (product, rows) = self.flattener.prepare_sheet(cells, sheet_name);
        let pairs = self.extract_rows(sheet_name, &product, &rows);
        (product, pairs)
    }

    /// タイトル行を除いた`RowUnit`の列からQ&Aペアを抽出する
    ///
    /// スプレッドシートI/Oを介さずに分割処理だけを行います。
    pub fn extract_rows(&self, sheet_name: &str, product: &str, rows: &[RowUnit]) -> Vec<QaPair> {
        let emitter = RecordEmitter::new(product, sheet_name);
        segment_rows(&self.classifier, emitter, rows)
    }

    /// 外部FAQ文書の項目を末尾に追加する
    ///
    /// # 戻り値
    ///
    /// 追加したペアの件数
    pub fn merge_faq(&self, pairs: &mut Vec<QaPair>, faq: &FaqDocument) -> usize {
        let faq_pairs = faq.to_pairs(&self.config.faq_source);
        let added = faq_pairs.len();
        info!(source = %self.config.faq_source, pairs = added, "merged FAQ document");
        pairs.extend(faq_pairs);
        added
    }

    /// Q&Aペアを指定した形式で書き出す
    pub fn render<W: Write>(
        &self,
        format: OutputFormat,
        pairs: &[QaPair],
        mut output: W,
    ) -> Result<(), XlsxQaError> {
        use std::io::BufWriter;

        let mut writer = BufWriter::new(&mut output);
        OutputFormatter::from_format(format).render(pairs, &mut writer, &self.config.system_prompt)?;
        writer.flush()?;
        Ok(())
    }

    /// Q&Aペアを指定した形式の文字列に変換する
    pub fn render_to_string(
        &self,
        format: OutputFormat,
        pairs: &[QaPair],
    ) -> Result<String, XlsxQaError> {
        let mut buffer = Vec::new();
        self.render(format, pairs, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxQaError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
