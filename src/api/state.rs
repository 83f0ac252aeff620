use tokio::sync::Mutex;

use crate::assistant::AssistantClient;
use crate::chat::SessionContext;
use crate::core::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub client: AssistantClient,
    // Locked for the full duration of a turn, which serializes
    // submissions: one in-flight run per session.
    pub session: Mutex<SessionContext>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = AssistantClient::new(&config.api_hostname, &config.api_key);
        Self {
            config,
            client,
            session: Mutex::new(SessionContext::new()),
        }
    }
}
