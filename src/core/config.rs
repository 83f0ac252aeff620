use std::env;
use std::time::Duration;

const DEFAULT_INSTRUCTIONS: &str =
    "You are a helpful assistant. Answer using the documents attached to the assistant \
     and say so when the answer is not covered by them.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_hostname: String,
    pub api_key: String,
    pub assistant_id: String,
    pub instructions: String,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_hostname = env::var("CONFAB_API_HOSTNAME")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let api_key = env::var("OPENAI_API_KEY").expect("Missing env var OPENAI_API_KEY");
        let assistant_id =
            env::var("CONFAB_ASSISTANT_ID").expect("Missing env var CONFAB_ASSISTANT_ID");
        let instructions =
            env::var("CONFAB_INSTRUCTIONS").unwrap_or_else(|_| DEFAULT_INSTRUCTIONS.to_string());
        let poll_interval = env::var("CONFAB_POLL_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(2));
        let poll_timeout = env::var("CONFAB_POLL_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(300));

        Self {
            api_hostname,
            api_key,
            assistant_id,
            instructions,
            poll_interval,
            poll_timeout,
        }
    }
}
