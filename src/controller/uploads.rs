use serde::{Deserialize, Serialize};
use validator::Validate;

/// A measurement file handed in through the upload view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UploadedFile {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub name: String,
    /// Size in KiB with two decimals, e.g. `"12.50 KB"`
    pub size: String,
}

impl From<&UploadedFile> for UploadSummary {
    fn from(file: &UploadedFile) -> Self {
        Self {
            name: file.name.clone(),
            size: format!("{:.2} KB", file.size_bytes as f64 / 1024.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_size_in_kb() {
        let file = UploadedFile {
            name: "T001_fra.csv".to_string(),
            size_bytes: 12_800,
        };
        assert_eq!(UploadSummary::from(&file).size, "12.50 KB");
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let file = UploadedFile {
            name: String::new(),
            size_bytes: 1,
        };
        assert!(file.validate().is_err());
    }
}
