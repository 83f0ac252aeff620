use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::assistant::AssistantClient;
use crate::chat::{SessionContext, submit_turn};
use crate::core::AppConfig;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let client = AssistantClient::new(&config.api_hostname, &config.api_key);
    let mut session = SessionContext::new();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match submit_turn(&client, &mut session, &config, &line).await {
                    Ok(reply) => println!("{}", reply),
                    // The turn is aborted but the session stays usable
                    // so the user can try again
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
