//! Cell Text Module
//!
//! calamineのセル値を、抽出処理で扱う表示テキストに変換するモジュール。

use calamine::{Data, ExcelDateTime};
use chrono::Duration;

/// Excelで表現できる最大シリアル値（10000-01-01の直前）
const MAX_EXCEL_SERIAL: f64 = 2_958_466.0;

/// 1日の秒数
const SECONDS_PER_DAY: i64 = 86_400;

/// セル値を表示テキストに変換するレンダラー
///
/// 変換規則:
///
/// - 文字列: そのまま
/// - 数値: 整数値は小数部なし（`5000`）、それ以外は`f64`の表示形式
/// - 論理値: `True` / `False`
/// - 日時: `YYYY-MM-DD HH:MM:SS`（1900/1904年システムはcalamineが解決）
/// - 時刻のみ（シリアル値 < 1）: `HH:MM:SS`
/// - 経過時間（`[h]:mm:ss`書式）: `1 day, 2:00:00`形式
/// - ISO日時・期間文字列: そのまま
/// - エラー値: `#N/A`などの表示文字列
/// - 空セル: `None`
///
/// 日付に変換できないシリアル値は数値として表示します。
#[derive(Debug, Default)]
pub(crate) struct CellTextRenderer;

impl CellTextRenderer {
    pub fn new() -> Self {
        Self
    }

    /// セル値をテキストに変換する。空セルは`None`
    pub fn render(&self, cell: &Data) -> Option<String> {
        let text = match cell {
            Data::Empty => return None,
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => format_number(*f),
            Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Data::DateTime(dt) => {
                format_excel_datetime(dt).unwrap_or_else(|| format_number(dt.as_f64()))
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
        };
        Some(text)
    }
}

/// 数値を文字列に変換（整数値は小数部を省略）
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// 日時セルを表示テキストに変換
///
/// 範囲外（負値・10000年以降・非有限値）は`None`を返します。
fn format_excel_datetime(dt: &ExcelDateTime) -> Option<String> {
    let serial = dt.as_f64();
    if !(0.0..MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    if dt.is_duration() {
        return dt.as_duration().and_then(format_duration);
    }

    let datetime = dt.as_datetime()?;
    if serial < 1.0 {
        Some(datetime.time().format("%H:%M:%S").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// 経過時間を`[N day(s), ]H:MM:SS`形式に変換
fn format_duration(duration: Duration) -> Option<String> {
    if duration < Duration::zero() {
        return None;
    }

    let total = duration.num_seconds();
    let days = total / SECONDS_PER_DAY;
    let rem = total % SECONDS_PER_DAY;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, rem % 3600 / 60, rem % 60);

    Some(match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    })
}
