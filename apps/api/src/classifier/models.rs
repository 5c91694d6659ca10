use serde::{Deserialize, Serialize};

/// Trace of the checks that decided a classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Why {
    /// An exclusion term caught the title.
    pub exclude: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<String>,
    /// Department whose own exclusion list caught the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_in: Option<String>,
    /// A department "must" phrase matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must: Option<bool>,
    /// A hierarchy tier matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<bool>,
    /// e.g. `"area+seniority"`, `"area+seniority+special"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_match: bool,
}

impl Why {
    pub fn excluded(term: &str) -> Self {
        Self {
            exclude: true,
            excluded_by: Some(term.to_string()),
            ..Self::default()
        }
    }

    pub fn no_department() -> Self {
        Self {
            must: Some(false),
            no_match: true,
            ..Self::default()
        }
    }
}

/// Output of one classification. Descriptive fields are empty strings unless
/// `is_icp` is true; `hierarchy_level` may also be empty for an ICP title that
/// carries no seniority keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The caller's title, unmodified.
    pub input: String,
    pub is_icp: bool,
    pub department: String,
    pub subdivision: String,
    pub hierarchy_level: String,
    pub role_generic: String,
    pub why: Why,
}

impl ClassificationResult {
    pub fn negative(input: &str, why: Why) -> Self {
        Self {
            input: input.to_string(),
            is_icp: false,
            department: String::new(),
            subdivision: String::new(),
            hierarchy_level: String::new(),
            role_generic: String::new(),
            why,
        }
    }
}
