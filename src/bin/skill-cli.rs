use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

use seattle_taxi_skill::envelope::request::{IntentRequest, Slot};
use seattle_taxi_skill::envelope::{Cause, Request, RequestEnvelope};

#[derive(Parser)]
#[command(name = "skill-cli")]
#[command(about = "Send simulated voice platform requests to the taxi skill", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Application id to put on the envelope.
    #[arg(long)]
    skill_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the skill
    Launch,
    /// Send an IntentRequest
    Intent {
        name: String,
        /// Slot value as name=value (repeatable)
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<(String, String)>,
    },
    /// Deliver a verification result as a SessionResumedRequest
    Resumed {
        #[arg(long, default_value_t = 200)]
        code: u16,
        #[arg(long, default_value = "ACHIEVED")]
        status: String,
        #[arg(long)]
        person: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
    /// End the session
    SessionEnded {
        #[arg(long)]
        reason: Option<String>,
    },
    /// Check the server is up
    Health,
}

fn parse_slot(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let envelope = match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            return print_response(res).await;
        }
        Commands::Launch => RequestEnvelope::new(Request::launch()),
        Commands::Intent { name, slots } => {
            let mut request = Request::intent(name);
            if let Request::IntentRequest(IntentRequest { intent, .. }) = &mut request {
                intent.slots = slots
                    .into_iter()
                    .map(|(name, value)| {
                        let slot = Slot {
                            name: name.clone(),
                            value: Some(value),
                            confirmation_status: None,
                        };
                        (name, slot)
                    })
                    .collect::<BTreeMap<_, _>>();
            }
            RequestEnvelope::new(request)
        }
        Commands::Resumed { code, status, person, token } => {
            let mut cause = Cause::completed(code, status);
            if let Some(token) = token {
                cause = cause.with_token(token);
            }
            let envelope = RequestEnvelope::new(Request::session_resumed(cause));
            match person {
                Some(person) => envelope.with_person(person),
                None => envelope,
            }
        }
        Commands::SessionEnded { reason } => RequestEnvelope::new(Request::session_ended(reason)),
    };

    let envelope = match cli.skill_id {
        Some(skill_id) => envelope.with_application_id(skill_id),
        None => envelope,
    };

    let res = client.post(&cli.url).json(&envelope).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: skill returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
