//! Security Module
//!
//! 入力ファイルの読み込みに関する制限を実装するモジュール。
//! ワークブックは一度だけ全体をメモリに読み込むため、上限サイズを設けます。

use std::io::Read;

use crate::error::XlsxQaError;

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
    /// 外部FAQ文書の最大サイズ（バイト）
    /// デフォルト: 64MB (67_108_864 bytes)
    pub max_faq_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
            max_faq_file_size: 67_108_864,      // 64MB
        }
    }
}

/// リーダーの内容をすべて読み込み、上限サイズを検証する
///
/// # 引数
///
/// * `reader` - 読み込み元
/// * `limit` - 許容する最大バイト数
/// * `what` - エラーメッセージに含める入力の種類
///
/// # 戻り値
///
/// * `Ok(Vec<u8>)` - 読み込んだバイト列
/// * `Err(XlsxQaError::SecurityViolation)` - 上限を超えた場合
pub(crate) fn read_limited<R: Read>(
    reader: R,
    limit: u64,
    what: &str,
) -> Result<Vec<u8>, XlsxQaError> {
    let mut buffer = Vec::new();
    // 上限+1バイトまで読めば超過を検出できる
    let bytes_read = reader.take(limit.saturating_add(1)).read_to_end(&mut buffer)?;

    if bytes_read as u64 > limit {
        return Err(XlsxQaError::SecurityViolation(format!(
            "{} size exceeds maximum: more than {} bytes",
            what, limit
        )));
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_limited_within_limit() {
        let data = vec![1u8; 16];
        let result = read_limited(Cursor::new(data.clone()), 16, "Input file").unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_read_limited_exceeds_limit() {
        let data = vec![1u8; 17];
        let result = read_limited(Cursor::new(data), 16, "Input file");
        match result {
            Err(XlsxQaError::SecurityViolation(msg)) => {
                assert!(msg.contains("Input file"));
                assert!(msg.contains("16"));
            }
            _ => panic!("Expected SecurityViolation error"),
        }
    }

    #[test]
    fn test_default_limits() {
        let config = SecurityConfig::default();
        assert_eq!(config.max_input_file_size, 2_147_483_648);
        assert!(config.max_faq_file_size < config.max_input_file_size);
    }
}
