//! Hierarchy matcher: seniority tier, independent of department.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::normalize::NormalizedTitle;
use crate::rules::HierarchyTier;

/// Seniority tiers, most senior first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HierarchyLevel {
    #[serde(rename = "C-Suite")]
    CSuite,
    #[serde(rename = "VP/Director")]
    VpDirector,
    Manager,
    Lead,
    Specialist,
}

impl HierarchyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyLevel::CSuite => "C-Suite",
            HierarchyLevel::VpDirector => "VP/Director",
            HierarchyLevel::Manager => "Manager",
            HierarchyLevel::Lead => "Lead",
            HierarchyLevel::Specialist => "Specialist",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyMatch<'a> {
    pub level: HierarchyLevel,
    pub keyword: &'a str,
}

/// Walks the tiers in catalogue order (C-Suite first) and returns the first
/// tier with a matching phrase. Within a tier the longest phrase is reported,
/// which is how "team lead" (Manager) wins over a bare "lead" (Lead).
pub fn match_hierarchy<'a>(
    tiers: &'a [HierarchyTier],
    title: &NormalizedTitle,
) -> Option<HierarchyMatch<'a>> {
    tiers.iter().find_map(|tier| {
        tier.keywords
            .first_match(&title.tokens)
            .map(|pattern| HierarchyMatch {
                level: tier.level,
                keyword: pattern.source(),
            })
    })
}
