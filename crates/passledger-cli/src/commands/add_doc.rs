//! `passledger add-doc`: attach a document fingerprint to a passport.

use clap::Args;
use passledger_core::DocumentFingerprint;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ErrorResponse, CALLER_HEADER, DEFAULT_ENDPOINT};

#[derive(Args, Debug)]
pub struct AddDocArgs {
    /// Passport address (the controlling account).
    pub passport: String,

    /// Document fingerprint as 0x-prefixed hex.
    #[arg(long, conflicts_with = "file")]
    pub fingerprint: Option<String>,

    /// Hash a local file (BLAKE3) and use the digest as the fingerprint.
    /// The file itself never leaves this machine.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Calling account identity (must be the passport's controller).
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
struct AddDocumentRequest {
    fingerprint: String,
}

#[derive(Deserialize)]
struct DocumentResponse {
    passport: String,
    fingerprint: String,
    trust_score: u64,
}

fn resolve_fingerprint(args: &AddDocArgs) -> anyhow::Result<DocumentFingerprint> {
    match (&args.fingerprint, &args.file) {
        // Reject malformed hex locally rather than bouncing off the node.
        (Some(hex), None) => {
            DocumentFingerprint::from_hex(hex).map_err(|e| anyhow::anyhow!("{}", e))
        }
        (None, Some(path)) => {
            let contents = std::fs::read(path)?;
            let digest = blake3::hash(&contents);
            Ok(DocumentFingerprint::from_bytes(*digest.as_bytes()))
        }
        _ => anyhow::bail!("pass exactly one of --fingerprint or --file"),
    }
}

pub async fn run(args: &AddDocArgs) -> anyhow::Result<()> {
    let fingerprint = resolve_fingerprint(args)?;

    let url = format!("{}/api/v1/passports/{}/documents", args.endpoint, args.passport);
    let body = AddDocumentRequest {
        fingerprint: fingerprint.to_hex(),
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
            let data: DocumentResponse = r.json().await?;
            if args.preview {
                println!("Preview only, nothing committed.");
            }
            println!("Document attached!");
            println!("  Passport:     {}", data.passport);
            println!("  Fingerprint:  {}", data.fingerprint);
            println!("  Trust score:  {}", data.trust_score);
        }
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!(
                    "add-doc failed ({}, HTTP {}): {}",
                    err.kind,
                    status,
                    err.error
                );
            } else {
                anyhow::bail!("add-doc failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
        }
    }

    Ok(())
}
