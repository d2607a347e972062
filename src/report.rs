use chrono::NaiveDateTime;

use crate::error::{PoolError, Result};
use crate::pool::ServerPool;

/// Lines like `ns1.example @ 192.0.2.1` name a tier-2 server; dashed rule
/// lines and IPv6 entries (anything containing a colon) are skipped.
fn is_entry_line(line: &str) -> bool {
    !line.starts_with('-') && line.contains(" @ ") && !line.contains(':')
}

fn address_of(line: &str) -> Option<&str> {
    line.split(" @ ").nth(1).map(str::trim)
}

/// Extracts every IPv4 server address from a raw T2 report body, in report
/// order.
pub fn parse_report(report: &str) -> Vec<String> {
    report
        .lines()
        .filter(|l| is_entry_line(l))
        .filter_map(address_of)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Feeds every address found in `report` into `pool`.
pub fn populate_pool(report: &str, pool: &mut ServerPool) {
    for address in parse_report(report) {
        pool.add_server(&address);
    }
}

/// The report's third line carries its generation date, e.g.
/// `2023 Aug 12, 06:00 UTC -- ...`. Returns it keyed as `YYYYMMDD`.
pub fn report_date(report: &str) -> Result<String> {
    let date_line = report.lines().nth(2).ok_or(PoolError::EmptyReport)?;
    let date_str = date_line.split("--").next().unwrap_or("").trim();

    // chrono has no parser for timezone abbreviations, so the trailing zone
    // token is dropped before parsing.
    let (without_zone, _zone) = date_str
        .rsplit_once(' ')
        .ok_or_else(|| PoolError::ReportDate(date_str.to_string()))?;

    let parsed = NaiveDateTime::parse_from_str(without_zone, "%Y %b %d, %H:%M")
        .map_err(|_| PoolError::ReportDate(date_str.to_string()))?;
    Ok(parsed.format("%Y%m%d").to_string())
}
