use std::time::Duration;
use wormguard_app::RuleSource;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Rule list fetched over HTTP(S). Any non-2xx status is a retrieval failure.
#[derive(Clone, Debug)]
pub struct HttpRuleSource {
    url: String,
}

impl HttpRuleSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RuleSource for HttpRuleSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> anyhow::Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("wormguard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let resp = client.get(&self.url).send()?.error_for_status()?;
        Ok(resp.text()?)
    }
}
