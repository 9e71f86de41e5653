//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use std::io::{Cursor, Read};
use tracing::debug;

use crate::api::SheetSelector;
use crate::error::XlsxQaError;
use crate::parser::CellTextRenderer;
use crate::security::{read_limited, SecurityConfig};
use crate::types::Cell;

/// ワークブックパーサー
///
/// 入力全体をメモリに読み込んでからcalamineで開きます。
/// xlsx / xlsm / xlsb / xls / ods を扱えます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
    /// セル値のテキスト変換
    renderer: CellTextRenderer,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(XlsxQaError::Parse)` - 破損している、または未対応の形式の場合
    /// * `Err(XlsxQaError::SecurityViolation)` - 入力サイズの上限を超えた場合
    pub fn open<R: Read>(reader: R) -> Result<Self, XlsxQaError> {
        let security_config = SecurityConfig::default();
        let buffer = read_limited(reader, security_config.max_input_file_size, "Input file")?;

        debug!(bytes = buffer.len(), "opening workbook");
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self {
            workbook,
            renderer: CellTextRenderer::new(),
        })
    }

    /// すべてのシート名を取得（ワークブック順）
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(XlsxQaError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, XlsxQaError> {
        let all_sheet_names = self.get_sheet_names();

        let by_index = |index: usize| -> Result<String, XlsxQaError> {
            all_sheet_names.get(index).cloned().ok_or_else(|| {
                XlsxQaError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                ))
            })
        };
        let by_name = |name: &String| -> Result<String, XlsxQaError> {
            if all_sheet_names.contains(name) {
                Ok(name.clone())
            } else {
                Err(XlsxQaError::Config(format!("Sheet '{}' not found", name)))
            }
        };

        match selector {
            SheetSelector::All => Ok(all_sheet_names.clone()),
            SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
            SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
            SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
            SheetSelector::Names(names) => names.iter().map(by_name).collect(),
        }
    }

    /// シートから値を持つセルを抽出する
    ///
    /// 座標は絶対位置（A1 = (0, 0)）で、行優先の順に並びます。
    pub fn parse_sheet(&mut self, sheet_name: &str) -> Result<Vec<Cell>, XlsxQaError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        // used_cells()の座標はレンジ開始位置からの相対値
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

        let cells: Vec<Cell> = range
            .used_cells()
            .filter_map(|(row, col, data)| {
                self.renderer.render(data).map(|text| {
                    Cell::new(row as u32 + row_offset, col as u32 + col_offset, text)
                })
            })
            .collect();

        debug!(sheet = sheet_name, cells = cells.len(), "parsed sheet");
        Ok(cells)
    }
}

// ワークブックを使うテストは統合テスト（tests/）で実装します。
