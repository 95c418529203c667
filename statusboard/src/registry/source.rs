//! エンドポイントソース
//!
//! サイト一覧（1行1アドレス）を読み込み、エンドポイントに変換する。

use crate::common::error::{EndpointParseError, SourceError};
use crate::types::endpoint::Endpoint;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

/// サイト一覧の供給元
#[async_trait]
pub trait EndpointSource: Send + Sync {
    /// 生のアドレス行を順番どおりに返す
    async fn read_lines(&self) -> Result<Vec<String>, SourceError>;

    /// ログ・エラー表示用の名前
    fn describe(&self) -> String;
}

/// ファイルから読み込むエンドポイントソース
#[derive(Debug, Clone)]
pub struct FileEndpointSource {
    path: PathBuf,
}

impl FileEndpointSource {
    /// ファイルパスを指定して作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EndpointSource for FileEndpointSource {
    async fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(content.lines().map(str::to_owned).collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// インメモリのエンドポイントソース（テスト・組み込み用）
#[derive(Debug, Clone, Default)]
pub struct StaticEndpointSource {
    lines: Vec<String>,
}

impl StaticEndpointSource {
    /// 行の一覧から作成
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl EndpointSource for StaticEndpointSource {
    async fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.lines.clone())
    }

    fn describe(&self) -> String {
        "static site list".to_string()
    }
}

/// 1行をエンドポイントに変換する
///
/// 空行とコメント行（`#`始まり）は`Ok(None)`。スキーム省略時は`http://`を補う。
pub fn parse_endpoint(line: &str) -> Result<Option<Endpoint>, EndpointParseError> {
    let raw = line.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return Ok(None);
    }

    let with_scheme = if has_explicit_scheme(raw) {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let address = Url::parse(&with_scheme).map_err(|source| EndpointParseError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })?;

    match address.scheme() {
        "http" | "https" => Ok(Some(Endpoint::new(raw, address))),
        other => Err(EndpointParseError::UnsupportedScheme {
            raw: raw.to_string(),
            scheme: other.to_string(),
        }),
    }
}

/// 先頭に`scheme://`があるか（パスやクエリ中の`://`は対象外）
fn has_explicit_scheme(raw: &str) -> bool {
    match raw.find("://") {
        Some(pos) => !raw[..pos].contains(|c: char| matches!(c, '/' | '?' | '#')),
        None => false,
    }
}

/// 行の一覧をエンドポイントに変換する
///
/// 不正な行と重複した名前はログに出してスキップする。
pub fn parse_endpoints<I, S>(lines: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut endpoints = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        match parse_endpoint(line) {
            Ok(Some(endpoint)) => {
                if !seen.insert(endpoint.name().to_string()) {
                    warn!(
                        line = index + 1,
                        endpoint_name = %endpoint.name(),
                        "Duplicate site skipped"
                    );
                    continue;
                }
                debug!(
                    endpoint_name = %endpoint.name(),
                    address = %endpoint.address(),
                    "Site parsed"
                );
                endpoints.push(endpoint);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(line = index + 1, error = %e, "Failed to parse site, skipping");
            }
        }
    }

    endpoints
}
