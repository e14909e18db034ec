use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the column inserted by [`CleaningConfig::assign_primary_key`].
pub const PRIMARY_KEY_COLUMN: &str = "PrimaryKey";

/// How nulls are treated before deduplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullAction {
    /// Leave nulls untouched
    #[default]
    Keep,
    /// Fill numeric-column nulls with the column mean
    Mean,
    /// Fill numeric-column nulls with the column median
    Median,
    /// Remove every row containing a null
    Drop,
}

impl NullAction {
    /// Lenient parse used for form fields: anything unrecognized keeps nulls.
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("mean") => Self::Mean,
            Some("median") => Self::Median,
            Some("drop") => Self::Drop,
            _ => Self::Keep,
        }
    }
}

impl fmt::Display for NullAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Mean => write!(f, "mean"),
            Self::Median => write!(f, "median"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

impl std::str::FromStr for NullAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "none" => Ok(Self::Keep),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "drop" => Ok(Self::Drop),
            other => Err(format!(
                "unknown null action '{other}' (expected keep, mean, median or drop)"
            )),
        }
    }
}

/// Options shared by every file of one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub null_action: NullAction,
    pub remove_duplicates: bool,
    pub assign_primary_key: bool,
    /// Declared kind from the upload form, informational only
    pub filetype: Option<String>,
}

impl CleaningConfig {
    /// Build a config from raw upload form values.
    ///
    /// `pk_action` must be `assign` and `remove_duplicates` must be `on`
    /// (the value browsers send for a ticked checkbox).
    pub fn from_form(
        filetype: Option<&str>,
        null_action: Option<&str>,
        pk_action: Option<&str>,
        remove_duplicates: Option<&str>,
    ) -> Self {
        Self {
            null_action: NullAction::from_form(null_action),
            remove_duplicates: remove_duplicates.is_some_and(|v| v.trim() == "on"),
            assign_primary_key: pk_action.is_some_and(|v| v.trim() == "assign"),
            filetype: filetype
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.null_action == NullAction::Keep && !self.remove_duplicates && !self.assign_primary_key
    }
}
