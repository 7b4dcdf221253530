//! `passledger vote`: cast a trust vote for a document in a passport.

use clap::Args;
use serde::Deserialize;

use super::{ErrorResponse, CALLER_HEADER, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// Passport address (the controlling account).
    pub passport: String,

    /// Document fingerprint as 0x-prefixed hex.
    pub fingerprint: String,

    /// Calling account identity (one vote per document).
    #[arg(short, long)]
    pub caller: String,

    /// Run without committing; the node returns the same tuple either way.
    #[arg(long)]
    pub preview: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct DocumentResponse {
    passport: String,
    fingerprint: String,
    trust_score: u64,
}

pub async fn run(args: &VoteArgs) -> anyhow::Result<()> {
    let url = format!(
        "{}/api/v1/passports/{}/documents/{}/votes",
        args.endpoint, args.passport, args.fingerprint
    );

    let client = reqwest::Client::new();
    let mut request = client.post(&url).header(CALLER_HEADER, &args.caller);
    if args.preview {
        request = request.query(&[("preview", "true")]);
    }
    let resp = request.send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let data: DocumentResponse = r.json().await?;
            if args.preview {
                println!("Preview only, nothing committed.");
            }
            println!("Vote recorded!");
            println!("  Passport:     {}", data.passport);
            println!("  Fingerprint:  {}", data.fingerprint);
            println!("  Trust score:  {}", data.trust_score);
        }
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!("vote failed ({}, HTTP {}): {}", err.kind, status, err.error);
            } else {
                anyhow::bail!("vote failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
        }
    }

    Ok(())
}
