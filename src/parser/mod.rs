//! Parser Module
//!
//! calamineを使用したワークブック解析の実装。
//! シートごとに値を持つセルを抽出し、表示テキストに変換します。

mod cell_text;
mod workbook;

pub(crate) use cell_text::CellTextRenderer;
pub(crate) use workbook::WorkbookParser;
