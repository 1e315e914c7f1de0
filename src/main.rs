use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use notify_assist::config::NotifyConfig;
use notify_assist::delivery::RestTransport;
use notify_assist::pipeline::processor::NotifyPipeline;
use notify_assist::pipeline::types::{NotificationRequest, ReviewState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = NotifyConfig::from_env()?;

    let mut team_names: Vec<&str> = config.teams.keys().map(String::as_str).collect();
    team_names.sort_unstable();

    eprintln!("📣 Notify Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Endpoint: {}", config.endpoint);
    eprintln!("   Drafts to: {}", config.user_identity);
    eprintln!("   Teams: {}", team_names.join(", "));
    eprintln!("   Type a conversation line and press Enter. Ctrl-D to exit.\n");

    let transport = Arc::new(RestTransport::new(config.endpoint.clone()));
    let pipeline = NotifyPipeline::new(config, transport);

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    // The last draft turn, awaiting an approval line.
    let mut pending_draft: Option<NotificationRequest> = None;

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }

        let result = match pending_draft.take() {
            Some(request) if pipeline.detects_approval(line) => {
                eprintln!("✅ Draft approved — sending to the team");
                pipeline.process_approval(request).await
            }
            kept => {
                pending_draft = kept;
                pipeline.process(line).await
            }
        };

        match result {
            Ok(outcome) => {
                if outcome.state == ReviewState::Draft {
                    eprintln!("📝 Draft routed to you — reply with an approval to send it");
                    pending_draft = Some(outcome.request.clone());
                }
                println!("{}", serde_json::to_string_pretty(&outcome.response)?);
            }
            Err(e) => eprintln!("❌ {}", e),
        }
        eprint!("> ");
    }

    Ok(())
}
