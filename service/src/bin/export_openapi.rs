//! Export the `OpenAPI` document as JSON.
//!
//! Usage: `cargo run --bin export_openapi > openapi.json`

#![allow(clippy::print_stdout)]

use memoria_civica_api::api::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    print!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
