//! `passledger init`: initialize a passport for the calling account.

use clap::Args;
use serde::{Deserialize, Serialize};

use super::{ErrorResponse, CALLER_HEADER, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Human-readable nickname to record on the passport.
    pub nickname: String,

    /// Calling account identity.
    #[arg(short, long)]
    pub caller: String,

    /// Run without committing; the node returns the same tuple either way.
    #[arg(long)]
    pub preview: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct InitRequest {
    nickname: String,
}

#[derive(Deserialize)]
struct InitResponse {
    nickname: String,
    controller: String,
}

pub async fn run(args: &InitArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/passports", args.endpoint);
    let body = InitRequest {
        nickname: args.nickname.clone(),
    };

    let client = reqwest::Client::new();
    let mut request = client
        .post(&url)
        .header(CALLER_HEADER, &args.caller)
        .json(&body);
    if args.preview {
        request = request.query(&[("preview", "true")]);
    }
    let resp = request.send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let data: InitResponse = r.json().await?;
            if args.preview {
                println!("Preview only, nothing committed.");
            }
            println!("Passport initialized!");
            println!("  Nickname:    {}", data.nickname);
            println!("  Controller:  {}", data.controller);
        }
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!("init failed ({}, HTTP {}): {}", err.kind, status, err.error);
            } else {
                anyhow::bail!("init failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
        }
    }

    Ok(())
}
