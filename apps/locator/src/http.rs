use std::path::Path;

use reqwest::Client;

use crate::config::LocatorConfig;
use crate::error::Result;
use crate::query::Transport;

/// reqwest-backed transport. Paths that are not http(s) URLs are read from
/// the local filesystem, so the location asset can live next to the binary.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &LocatorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client })
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        if !is_remote(url) {
            log::debug!("Reading local file: {url}");
            return Ok(tokio::fs::read_to_string(Path::new(url)).await?);
        }

        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        log::debug!("{url} answered {}", response.status());
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("https://api.easyfarms.in/warehouses"));
        assert!(is_remote("http://localhost:8080/x.csv"));
        assert!(!is_remote("data/locations.csv"));
        assert!(!is_remote("/srv/locations.csv"));
    }

    #[tokio::test]
    async fn test_reads_local_files() -> Result<()> {
        let path = std::env::temp_dir().join(format!("locator-http-{}.csv", std::process::id()));
        tokio::fs::write(&path, "state_name_english,district_name_english\n").await?;

        let transport = HttpTransport::new(&LocatorConfig::default())?;
        let text = transport.get_text(&path.to_string_lossy()).await?;
        tokio::fs::remove_file(&path).await?;

        assert!(text.starts_with("state_name_english"));
        Ok(())
    }
}
