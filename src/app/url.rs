//! URL list reading and normalization.
//!
//! Invalid entries are kept: they reach the pipeline and come back as failed
//! results, so every line of the input is accounted for.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Adds an `https://` prefix to entries without any scheme.
///
/// Surrounding whitespace is trimmed; anything containing `://` is left as is.
pub fn normalize_url(entry: &str) -> String {
    let trimmed = entry.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Reads URLs from `path`, or from stdin when `path` is `-`.
///
/// Blank lines and `#` comments are skipped. Files ending in `.csv` take
/// their URL from the first column and skip a leading `url` header.
pub async fn read_urls(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading URLs from stdin");
        return read_url_lines(tokio::io::stdin()).await;
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let urls = if is_csv {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_csv_urls(&bytes)
            .with_context(|| format!("Failed to parse CSV input {}", path.display()))?
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_url_lines(file).await?
    };
    log::info!("Total URLs in {}: {}", path.display(), urls.len());
    Ok(urls)
}

/// Reads one URL per line from any async reader.
pub async fn read_url_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut urls = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read URL list")? {
        if let Some(url) = keep_entry(&line) {
            urls.push(url);
        }
    }
    Ok(urls)
}

/// URLs from the first column of CSV data; a leading `url` header is skipped.
pub fn read_csv_urls(data: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut urls = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.context("Malformed CSV record")?;
        let first = record.get(0).unwrap_or_default();
        if index == 0 && first.eq_ignore_ascii_case("url") {
            continue;
        }
        if let Some(url) = keep_entry(first) {
            urls.push(url);
        }
    }
    Ok(urls)
}

fn keep_entry(raw: &str) -> Option<String> {
    let entry = raw.trim();
    if entry.is_empty() || entry.starts_with('#') {
        None
    } else {
        Some(normalize_url(entry))
    }
}
