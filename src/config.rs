use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_STORAGE_DIR: &str = ".nexmedis";
const DEFAULT_STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub storage_path: PathBuf,
    /// `None` leaves the transport default in place.
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        let api_base_url =
            parse_base_url(&env::var("NEXMEDIS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))?;

        let storage_path = match env::var("NEXMEDIS_STORAGE_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_storage_path()?,
        };

        let http_timeout = parse_timeout(env::var("NEXMEDIS_HTTP_TIMEOUT_SECS").ok().as_deref())?;

        Ok(Config {
            api_base_url,
            storage_path,
            http_timeout,
        })
    }
}

pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("NEXMEDIS_API_URL must be an http or https URL, got '{}'", raw);
    }

    if url.cannot_be_a_base() {
        anyhow::bail!("NEXMEDIS_API_URL must be an absolute origin, got '{}'", raw);
    }

    Ok(url)
}

/// Blank or unset means no explicit timeout.
pub fn parse_timeout(raw: Option<&str>) -> anyhow::Result<Option<Duration>> {
    match raw.map(str::trim) {
        Some(secs) if !secs.is_empty() => Ok(Some(Duration::from_secs(secs.parse()?))),
        _ => Ok(None),
    }
}

fn default_storage_path() -> anyhow::Result<PathBuf> {
    let home = home::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot resolve home directory; set NEXMEDIS_STORAGE_PATH"))?;
    Ok(home.join(DEFAULT_STORAGE_DIR).join(DEFAULT_STORAGE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_accepts_http_origins() {
        let url = parse_base_url("http://localhost:3000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/");

        let url = parse_base_url(" https://lamelia.ludbakazar.my.id ").unwrap();
        assert_eq!(url.host_str(), Some("lamelia.ludbakazar.my.id"));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("mailto:ops@example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_parse_timeout_treats_blank_as_unset() {
        assert_eq!(parse_timeout(None).unwrap(), None);
        assert_eq!(parse_timeout(Some("")).unwrap(), None);
        assert_eq!(parse_timeout(Some("   ")).unwrap(), None);
        assert_eq!(parse_timeout(Some(" 15 ")).unwrap(), Some(Duration::from_secs(15)));
        assert!(parse_timeout(Some("soon")).is_err());
    }

    #[test]
    fn test_default_storage_path_lives_under_home() {
        if let Ok(path) = default_storage_path() {
            assert!(path.ends_with(".nexmedis/storage.json"));
        }
    }
}
