//! Print the OpenAPI document as JSON.

use clap::Parser;
use patient_registry::ApiDoc;
use utoipa::OpenApi;

/// Dump the Patient API OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version)]
struct Args {
    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    println!("{json}");
    Ok(())
}
