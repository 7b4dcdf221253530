//! `passledger show`: display a passport and its documents.

use clap::Args;
use serde::Deserialize;

use super::{ErrorResponse, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Passport address (the controlling account).
    pub passport: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct DocumentSummary {
    fingerprint: String,
    trust_score: u64,
    voter_count: usize,
}

#[derive(Deserialize)]
struct PassportResponse {
    controller: String,
    nickname: String,
    created_at: String,
    documents: Vec<DocumentSummary>,
}

pub async fn run(args: &ShowArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/passports/{}", args.endpoint, args.passport);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let passport: PassportResponse = r.json().await?;
            println!("Passport:");
            println!("  Controller:  {}", passport.controller);
            println!("  Nickname:    {}", passport.nickname);
            println!("  Created:     {}", passport.created_at);
            if passport.documents.is_empty() {
                println!("  Documents:   (none)");
            } else {
                println!("  Documents:");
                for doc in &passport.documents {
                    println!(
                        "    {}  score {}  ({} voters)",
                        doc.fingerprint, doc.trust_score, doc.voter_count
                    );
                }
            }
        }
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!("show failed ({}, HTTP {}): {}", err.kind, status, err.error);
            } else {
                anyhow::bail!("show failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
        }
    }

    Ok(())
}
