use std::io;
use std::path::Path;
use tokio::fs;

/// Adds `https://` to bare hosts.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Splits a comma separated list, dropping empty entries.
pub fn parse_url_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_url)
        .collect()
}

/// Reads one URL per line. Blank lines and `#` comments are ignored.
pub async fn process_urls_from_file(file_path: &Path) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(file_path).await?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(normalize_url)
        .collect())
}
