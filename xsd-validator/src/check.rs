use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use xsd_validator_core::{dto::ValidationResponse, Outcome, ReferencePolicy, RequestFields};

#[derive(Debug, Args)]
#[command(
    about = "Validate an XML file against an XSD locally",
    after_help = "Prints the same JSON body the HTTP function would answer with.

Examples:
  xsd-validator check --data invoice.xml --schema invoice.xsd
  xsd-validator check --data invoice.xml --schema invoice.xsd --pretty

Exit status is 0 when a verdict was reached (valid or not), 1 otherwise."
)]
pub struct Check {
    #[arg(long, help = "Path to the XML document")]
    pub data: PathBuf,

    #[arg(long, help = "Path to the XSD schema")]
    pub schema: PathBuf,

    #[arg(long, help = "Pretty-print the JSON response")]
    pub pretty: bool,
}

/// Run the check and return the response together with its HTTP status.
pub fn evaluate(cmd: &Check) -> Result<(u16, ValidationResponse)> {
    let data = fs::read_to_string(&cmd.data)
        .with_context(|| format!("Failed to read XML document: {}", cmd.data.display()))?;
    let schema = fs::read_to_string(&cmd.schema)
        .with_context(|| format!("Failed to read XSD schema: {}", cmd.schema.display()))?;

    let fields = RequestFields::new(data, schema);
    let outcome = Outcome::from_result(fields.validate(&ReferencePolicy::disabled()));

    if let Outcome::Unresolvable(cause) = &outcome {
        tracing::warn!(%cause, "no verdict reached");
    }

    Ok((outcome.status_code(), outcome.to_response()))
}

pub fn handle(cmd: Check) -> Result<()> {
    let (status, response) = evaluate(&cmd)?;

    let rendered = if cmd.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", rendered);

    if status != 200 {
        std::process::exit(1);
    }
    Ok(())
}
