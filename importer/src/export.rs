use crate::error::{ImportError, Result};
use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use shared_types::StoredContact;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: &str = "Name,Email,Company,Title,Phone,Location,LinkedIn,Industry,Notes,Imported At,Source";

pub fn export_file_name() -> String {
    format!("contactout-contacts-{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Writes `contacts` to `<dir>/contactout-contacts-YYYY-MM-DD.csv`. Every
/// value is double-quoted; nothing is written for an empty list.
pub fn export_csv(contacts: &[StoredContact], dir: &Path) -> Result<PathBuf> {
    if contacts.is_empty() {
        return Err(ImportError::EmptyExport);
    }

    std::fs::create_dir_all(dir).map_err(|e| ImportError::ExportFailed(e.to_string()))?;
    let path = dir.join(export_file_name());

    let mut file =
        std::fs::File::create(&path).map_err(|e| ImportError::ExportFailed(e.to_string()))?;
    writeln!(file, "{}", HEADER).map_err(|e| ImportError::ExportFailed(e.to_string()))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(file);

    for contact in contacts {
        writer
            .write_record([
                &contact.name,
                &contact.email,
                &contact.company,
                &contact.title,
                &contact.phone,
                &contact.location,
                &contact.linkedin,
                &contact.industry,
                &contact.notes,
                &contact.imported_at,
                &contact.source,
            ])
            .map_err(|e| ImportError::ExportFailed(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ImportError::ExportFailed(e.to_string()))?;

    info!("Exported {} contacts to {}", contacts.len(), path.display());
    Ok(path)
}
