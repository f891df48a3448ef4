use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the popup form and API payloads
    let mut types = Vec::new();

    // Record types
    types.push(clean_type(ContactRecord::export_to_string()?));
    types.push(clean_type(ContactStatus::export_to_string()?));
    types.push(clean_type(ValidStatus::export_to_string()?));
    types.push(clean_type(SocialLink::export_to_string()?));
    types.push(clean_type(ProfessionalExperience::export_to_string()?));
    types.push(clean_type(EducationExperience::export_to_string()?));
    types.push(clean_type(MainProfessionalExperience::export_to_string()?));
    types.push(clean_type(PersonalDetail::export_to_string()?));

    // Local storage types
    types.push(clean_type(StoredContact::export_to_string()?));

    // Extraction types
    types.push(clean_type(ExtractionMethod::export_to_string()?));

    // Remote API types
    types.push(clean_type(CreateContactRequest::export_to_string()?));
    types.push(clean_type(LoginRequest::export_to_string()?));
    types.push(clean_type(LoginResponse::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../ui/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in the same file, so sibling imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
