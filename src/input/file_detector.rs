//! Record file format detection

#[derive(Debug, Clone, PartialEq)]
pub enum RecordFormat {
    Json,
    Toml,
    Unknown,
}

impl RecordFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => RecordFormat::Json,
            "toml" => RecordFormat::Toml,
            _ => RecordFormat::Unknown,
        }
    }
}
