//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxqaクレート全体で使用するエラー型
///
/// ワークブックの読み込み、Q&Aの抽出、FAQのマージ、出力処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Json`: FAQ文書の読み込み・出力のシリアライズ中に発生したエラー
/// - `Config`: 設定の検証に失敗したエラー（空の区切り文字など）
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxqa::XlsxQaError;
/// use std::fs::File;
///
/// fn open_knowledge_base(path: &str) -> Result<(), XlsxQaError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxQaError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。この場合、出力は一切生成されません。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONの解析・シリアライズエラー
    ///
    /// 外部FAQ文書が不正なJSONである場合や、出力レコードの
    /// シリアライズに失敗した場合に発生します。
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時、またはシート選択時に無効な設定が
    /// 検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxqa::{ExtractorBuilder, XlsxQaError};
    ///
    /// let result = ExtractorBuilder::new()
    ///     .with_row_separator("")  // 空の区切り文字は無効
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxQaError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルが許容サイズを超えている場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxQaError = io_err.into();

        match error {
            XlsxQaError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: XlsxQaError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse workbook"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let error: XlsxQaError = json_err.into();

        assert!(matches!(error, XlsxQaError::Json(_)));
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_config_error_display() {
        let error = XlsxQaError::Config("Row separator must not be empty".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("Row separator must not be empty"));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxQaError> {
            let _file = std::fs::File::open("nonexistent_knowledge_base.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(XlsxQaError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: XlsxQaError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let parse_err: XlsxQaError = calamine::Error::Msg("test parse").into();
        assert!(parse_err.to_string().starts_with("Failed to parse workbook"));

        let config_err = XlsxQaError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = XlsxQaError::SecurityViolation("too large".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
