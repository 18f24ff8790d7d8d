//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            _ => FileType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_case_insensitive() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
    }

    #[test]
    fn test_other_extensions_are_unknown() {
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
        assert_eq!(FileType::from_extension("txt"), FileType::Unknown);
    }
}
