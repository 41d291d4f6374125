use shared_types::typescript_gen::API_TYPE_NAMES;
use std::fs;
use std::path::PathBuf;

/// Writes the API types as a single TypeScript module.
///
/// Usage: generate_api_types [OUTPUT_DIR]   (default: web/api-types)
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("web/api-types"));

    let definitions = shared_types::generate_typescript_definitions(API_TYPE_NAMES)?;

    fs::create_dir_all(&output_dir)?;
    let output_path = output_dir.join("types.ts");
    fs::write(&output_path, format!("{}\n", definitions))?;

    println!("Generated TypeScript types in {}", output_path.display());
    Ok(())
}
