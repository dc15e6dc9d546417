//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the review API to disk. The output path is
//! the first argument, `openapi.json` when omitted.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let mut doc = ApiDoc::openapi();
    doc.info.title = "Candidate Review API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();

    std::fs::write(&path, doc.to_pretty_json()?)?;
    println!("OpenAPI document written to {} ({} paths)", path, doc.paths.paths.len());
    Ok(())
}
