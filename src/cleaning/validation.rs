//! Upload filename checks.

/// Lowercased suffix after the last `.`, if there is one.
pub fn extension_of(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Extension allow-list for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPolicy {
    allowed: Vec<String>,
}

impl ExtensionPolicy {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// True iff `filename` has a `.` and its lowercased last suffix is allowed.
    pub fn is_allowed(&self, filename: &str) -> bool {
        extension_of(filename).is_some_and(|ext| self.allowed.contains(&ext))
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self::new(["csv", "xls", "xlsx"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        let policy = ExtensionPolicy::default();
        assert!(policy.is_allowed("sales.csv"));
        assert!(policy.is_allowed("Q1.Report.XLSX"));
        assert!(policy.is_allowed("legacy.xls"));
    }

    #[test]
    fn test_rejected_extensions() {
        let policy = ExtensionPolicy::default();
        assert!(!policy.is_allowed("notes.txt"));
        assert!(!policy.is_allowed("csv"));
        assert!(!policy.is_allowed(""));
        assert!(!policy.is_allowed("archive.csv.gz"));
        assert!(!policy.is_allowed("trailing."));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.b.CsV").as_deref(), Some("csv"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("dot.").as_deref(), Some(""));
    }

    #[test]
    fn test_custom_policy() {
        let policy = ExtensionPolicy::new(["CSV"]);
        assert!(policy.is_allowed("x.csv"));
        assert!(!policy.is_allowed("x.xlsx"));
        assert_eq!(policy.allowed(), ["csv"]);
    }
}
