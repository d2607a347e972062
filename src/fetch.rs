use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{PoolError, Result};

/// Full tier-2 report, one line per server.
pub const REPORT_URL: &str = "http://report.opennicproject.org/files/t2report.txt";

/// GeoIP-filtered server list. Not every tier-2 server shows up through this
/// API, so the report stays the primary source.
pub const GEOIP_URL: &str = "https://api.opennicproject.org/geoip/?bare&wl&bl&pct=1&res=999";

/// Today's date in the `YYYYMMDD` form used to key cache files.
pub fn today_key() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Where today's raw report is cached.
pub fn report_path(dir: &Path) -> PathBuf {
    dir.join(format!("dns-report-{}.txt", today_key()))
}

/// Where today's probed-and-ranked results are saved.
pub fn results_path(dir: &Path) -> PathBuf {
    dir.join(format!("dns-{}.txt", today_key()))
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    if body.trim().is_empty() {
        return Err(PoolError::EmptyReport);
    }
    Ok(body)
}

pub async fn fetch_report(client: &reqwest::Client) -> Result<String> {
    fetch_text(client, REPORT_URL).await
}

pub async fn fetch_geoip_list(client: &reqwest::Client) -> Result<String> {
    fetch_text(client, GEOIP_URL).await
}

/// Returns today's report body, fetching from `url` only when the dated
/// cache file in `dir` is absent or `force` is set.
pub async fn cached_report(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
    force: bool,
) -> Result<String> {
    let path = report_path(dir);
    if !force && path.is_file() {
        tracing::info!(path = %path.display(), "reusing cached report");
        return Ok(tokio::fs::read_to_string(&path).await?);
    }

    tracing::info!(url, "fetching report");
    let body = fetch_text(client, url).await?;
    tokio::fs::write(&path, &body).await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_paths_are_date_keyed() {
        let dir = Path::new("/tmp");
        let key = today_key();
        assert_eq!(key.len(), 8);
        assert_eq!(
            report_path(dir),
            dir.join(format!("dns-report-{key}.txt"))
        );
        assert_eq!(results_path(dir), dir.join(format!("dns-{key}.txt")));
    }
}
