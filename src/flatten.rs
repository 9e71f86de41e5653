//! Cell Flattener Module
//!
//! シートのセル集合を、行単位のテキスト（`RowUnit`）の列に変換するモジュール。
//! 数式セルやナビゲーション用のラベルはここで取り除かれます。

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::types::{Cell, RowUnit};

/// セルの取捨選択と行連結の規則
#[derive(Debug, Clone)]
pub(crate) struct CellFlattener {
    /// 数式セルを示す先頭文字
    formula_marker: char,
    /// センチネルラベル（小文字化済み）
    sentinel_labels: HashSet<String>,
    /// 同一行の連結に使う区切り文字
    row_separator: String,
}

impl CellFlattener {
    pub fn new<I, S>(formula_marker: char, sentinel_labels: I, row_separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            formula_marker,
            sentinel_labels: sentinel_labels
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
            row_separator: row_separator.to_string(),
        }
    }

    /// 内容として扱えるセルテキストなら、トリム済みのテキストを返す
    fn usable_text<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let text = raw.trim();
        if text.is_empty()
            || text.starts_with(self.formula_marker)
            || self.sentinel_labels.contains(&text.to_lowercase())
        {
            return None;
        }
        Some(text)
    }

    /// 1行目から商品名を推定する
    ///
    /// 1行目（行番号0）で最初に見つかった有効なセルのテキストを返します。
    /// 見つからない場合はシート名を使います。
    pub fn infer_product_name(&self, cells: &[Cell], sheet_name: &str) -> String {
        let mut first_row: Vec<&Cell> = cells.iter().filter(|c| c.coord.row == 0).collect();
        first_row.sort_by_key(|c| c.coord.col);

        first_row
            .into_iter()
            .find_map(|c| self.usable_text(&c.text))
            .map(str::to_string)
            .unwrap_or_else(|| sheet_name.to_string())
    }

    /// セルを行ごとにまとめ、行番号の昇順で`RowUnit`の列を返す
    ///
    /// 有効なセルが1つもない行は出力されません。
    pub fn flatten(&self, cells: &[Cell]) -> Vec<RowUnit> {
        let mut rows: BTreeMap<u32, Vec<(u32, &str)>> = BTreeMap::new();
        for cell in cells {
            match self.usable_text(&cell.text) {
                Some(text) => rows
                    .entry(cell.coord.row)
                    .or_default()
                    .push((cell.coord.col, text)),
                None if !cell.text.trim().is_empty() => {
                    trace!(
                        cell = %cell.coord.to_a1_notation(),
                        text = %cell.text.trim(),
                        "skipping formula or navigation cell"
                    );
                }
                None => {}
            }
        }

        rows.into_iter()
            .map(|(row, mut texts)| {
                texts.sort_by_key(|(col, _)| *col);
                let combined = match texts.as_slice() {
                    [(_, only)] => (*only).to_string(),
                    _ => texts
                        .iter()
                        .map(|(_, text)| *text)
                        .collect::<Vec<_>>()
                        .join(&self.row_separator),
                };
                RowUnit::new(row, combined)
            })
            .collect()
    }

    /// 先頭行が商品名と一致するタイトル行なら取り除く
    pub fn drop_title_row(&self, mut rows: Vec<RowUnit>, product: &str) -> Vec<RowUnit> {
        if rows
            .first()
            .is_some_and(|first| first.text.trim() == product.trim())
        {
            rows.remove(0);
        }
        rows
    }

    /// シートのセルから商品名と本文の`RowUnit`列を得る
    pub fn prepare_sheet(&self, cells: &[Cell], sheet_name: &str) -> (String, Vec<RowUnit>) {
        let product = self.infer_product_name(cells, sheet_name);
        let rows = self.drop_title_row(self.flatten(cells), &product);
        (product, rows)
    }
}
