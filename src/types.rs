//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        format!("{}{}", Self::col_index_to_letter(self.col), self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    pub fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// 値を持つ1セル（パーサーから抽出された生テキスト）
///
/// 1シートの処理中だけ存在します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// セル座標
    pub coord: CellCoord,
    /// 表示テキスト（未加工）
    pub text: String,
}

impl Cell {
    pub fn new(row: u32, col: u32, text: impl Into<String>) -> Self {
        Self {
            coord: CellCoord::new(row, col),
            text: text.into(),
        }
    }
}

/// 1行分のテキスト単位
///
/// 同じ行の複数セルを区切り文字で連結したもの。行番号ごとに一意で、
/// 行番号の昇順に並びます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUnit {
    /// 行番号（0始まり）
    pub row: u32,
    /// 連結済みテキスト
    pub text: String,
}

impl RowUnit {
    pub fn new(row: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            text: text.into(),
        }
    }
}

/// 抽出されたQ&Aペア
///
/// 出力の最小単位です。`question`と`answer`は正規化後に空でなく、
/// `product`と`sheet`（出典情報）も空になりません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
    /// 商品名（シート1行目から推定）
    pub product: String,
    /// 出典シート名
    pub sheet: String,
}

/// シートごとの抽出結果の集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    /// シート名
    pub sheet: String,
    /// 推定された商品名（スキップ時はNone）
    pub product: Option<String>,
    /// 抽出されたQ&Aペア数
    pub pairs: usize,
    /// スキップ対象シートだったか
    pub skipped: bool,
}

/// 1回の実行全体の抽出結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// 全シートのQ&Aペア（シート順、行順）
    pub pairs: Vec<QaPair>,
    /// シートごとの集計（ワークブック順）
    pub sheets: Vec<SheetReport>,
}

impl ExtractionReport {
    /// スキップされたシート名の一覧
    pub fn skipped_sheets(&self) -> Vec<&str> {
        self.sheets
            .iter()
            .filter(|s| s.skipped)
            .map(|s| s.sheet.as_str())
            .collect()
    }

    /// 商品ごとのQ&A件数（件数の降順、同数は商品名の昇順）
    pub fn product_counts(&self) -> Vec<(String, usize)> {
        product_counts(&self.pairs)
    }
}

/// 商品ごとのQ&A件数を集計する
///
/// 件数の降順、同数の場合は商品名の昇順で返します。
pub fn product_counts(pairs: &[QaPair]) -> Vec<(String, usize)> {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for pair in pairs {
        *counts.entry(pair.product.as_str()).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(product, count)| (product.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
