//! Rule catalogue: departments, hierarchy tiers and exclusion terms.
//!
//! The catalogue is data, not code: a versioned JSON document (embedded at
//! build time, or read from `ICP_RULES_PATH`) that is validated and compiled
//! once into a `RuleCatalogue`. The classifier only ever sees the compiled,
//! immutable form.

pub mod store;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::exclusion::{ExclusionError, ExclusionTerm};
use crate::classifier::hierarchy::HierarchyLevel;
use crate::classifier::matching::{KeywordSet, PatternError};

/// Subdivision reported when no subdivision keyword of the department matches.
pub const DEFAULT_SUBDIVISION: &str = "General";

const EMBEDDED_CATALOGUE: &str = include_str!("../../rules/catalogue.json");

// ────────────────────────────────────────────────────────────────────────────
// Document model (what the JSON file contains)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueDocument {
    pub version: String,
    pub exclusions: Vec<String>,
    pub hierarchy: Vec<TierDocument>,
    pub departments: Vec<DepartmentDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierDocument {
    pub level: HierarchyLevel,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDocument {
    pub name: String,
    pub must: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub subdivisions: Vec<SubdivisionDocument>,
    #[serde(default)]
    pub specials: Vec<SpecialDocument>,
    #[serde(default)]
    pub roles: BTreeMap<HierarchyLevel, String>,
    pub default_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdivisionDocument {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDocument {
    pub label: String,
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled model (what the classifier runs over)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HierarchyTier {
    pub level: HierarchyLevel,
    pub keywords: KeywordSet,
}

#[derive(Debug, Clone)]
pub struct Subdivision {
    pub name: String,
    pub keywords: KeywordSet,
}

/// A named role whose label wins over the hierarchy table, e.g. "CTO" → "CTOs".
#[derive(Debug, Clone)]
pub struct SpecialRole {
    pub label: String,
    pub keywords: KeywordSet,
}

#[derive(Debug, Clone)]
pub struct Department {
    pub name: String,
    pub must: KeywordSet,
    pub exclude: Vec<ExclusionTerm>,
    pub subdivisions: Vec<Subdivision>,
    pub specials: Vec<SpecialRole>,
    pub roles: BTreeMap<HierarchyLevel, String>,
    pub default_role: String,
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read rule catalogue '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rule catalogue is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule catalogue defines no departments")]
    NoDepartments,

    #[error("rule catalogue defines no hierarchy tiers")]
    NoHierarchy,

    #[error("department '{0}' is defined more than once")]
    DuplicateDepartment(String),

    #[error("hierarchy level '{0}' is defined more than once")]
    DuplicateTier(HierarchyLevel),

    #[error("{0}")]
    Invalid(String),

    #[error("{context}: {source}")]
    Pattern {
        context: String,
        #[source]
        source: PatternError,
    },

    #[error("{context}: {source}")]
    Exclusion {
        context: String,
        #[source]
        source: ExclusionError,
    },
}

/// A validated, compiled catalogue. Immutable once built.
#[derive(Debug, Clone)]
pub struct RuleCatalogue {
    document: CatalogueDocument,
    exclusions: Vec<ExclusionTerm>,
    hierarchy: Vec<HierarchyTier>,
    departments: Vec<Department>,
}

impl RuleCatalogue {
    /// The catalogue shipped inside the binary.
    pub fn embedded() -> Result<Self, CatalogueError> {
        Self::from_json(EMBEDDED_CATALOGUE)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let document: CatalogueDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_document(document: CatalogueDocument) -> Result<Self, CatalogueError> {
        if document.departments.is_empty() {
            return Err(CatalogueError::NoDepartments);
        }
        if document.hierarchy.is_empty() {
            return Err(CatalogueError::NoHierarchy);
        }

        let exclusions = compile_terms(&document.exclusions, "built-in exclusions")?;

        let mut seen_levels = HashSet::new();
        let hierarchy = document
            .hierarchy
            .iter()
            .map(|tier| {
                if !seen_levels.insert(tier.level) {
                    return Err(CatalogueError::DuplicateTier(tier.level));
                }
                Ok(HierarchyTier {
                    level: tier.level,
                    keywords: compile_keywords(&tier.keywords, || {
                        format!("hierarchy tier '{}'", tier.level)
                    })?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen_names = HashSet::new();
        let departments = document
            .departments
            .iter()
            .map(|doc| {
                if !seen_names.insert(doc.name.as_str()) {
                    return Err(CatalogueError::DuplicateDepartment(doc.name.clone()));
                }
                compile_department(doc)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            document,
            exclusions,
            hierarchy,
            departments,
        })
    }

    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// The source document, as served by `GET /rules`.
    pub fn document(&self) -> &CatalogueDocument {
        &self.document
    }

    pub fn exclusions(&self) -> &[ExclusionTerm] {
        &self.exclusions
    }

    pub fn hierarchy(&self) -> &[HierarchyTier] {
        &self.hierarchy
    }

    /// Departments in priority order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }
}

fn compile_department(doc: &DepartmentDocument) -> Result<Department, CatalogueError> {
    let name = doc.name.trim();
    if name.is_empty() {
        return Err(CatalogueError::Invalid("department name is empty".to_string()));
    }
    if doc.must.is_empty() && doc.specials.is_empty() {
        return Err(CatalogueError::Invalid(format!(
            "department '{name}' has neither must keywords nor special roles"
        )));
    }
    if doc.default_role.trim().is_empty() {
        return Err(CatalogueError::Invalid(format!(
            "department '{name}' has an empty default_role"
        )));
    }

    let subdivisions = doc
        .subdivisions
        .iter()
        .map(|sub| {
            Ok(Subdivision {
                name: sub.name.clone(),
                keywords: compile_keywords(&sub.keywords, || {
                    format!("department '{name}', subdivision '{}'", sub.name)
                })?,
            })
        })
        .collect::<Result<Vec<_>, CatalogueError>>()?;

    let specials = doc
        .specials
        .iter()
        .map(|special| {
            Ok(SpecialRole {
                label: special.label.clone(),
                keywords: compile_keywords(&special.keywords, || {
                    format!("department '{name}', special role '{}'", special.label)
                })?,
            })
        })
        .collect::<Result<Vec<_>, CatalogueError>>()?;

    Ok(Department {
        name: name.to_string(),
        must: compile_keywords(&doc.must, || format!("department '{name}', must keywords"))?,
        exclude: compile_terms(&doc.exclude, &format!("department '{name}', exclusions"))?,
        subdivisions,
        specials,
        roles: doc.roles.clone(),
        default_role: doc.default_role.clone(),
    })
}

fn compile_keywords(
    sources: &[String],
    context: impl Fn() -> String,
) -> Result<KeywordSet, CatalogueError> {
    KeywordSet::compile(sources).map_err(|source| CatalogueError::Pattern {
        context: context(),
        source,
    })
}

fn compile_terms(sources: &[String], context: &str) -> Result<Vec<ExclusionTerm>, CatalogueError> {
    sources
        .iter()
        .map(|term| {
            ExclusionTerm::parse(term).map_err(|source| CatalogueError::Exclusion {
                context: context.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use serde_json::json;

    use crate::classifier::exclusion::ExclusionMode;
    use crate::classifier::normalize::NormalizedTitle;

    fn minimal() -> serde_json::Value {
        json!({
            "version": "test",
            "exclusions": ["junior"],
            "hierarchy": [
                {"level": "Manager", "keywords": ["manager"]}
            ],
            "departments": [
                {
                    "name": "Marketing",
                    "must": ["marketing"],
                    "default_role": "marketing"
                }
            ]
        })
    }

    #[test]
    fn test_embedded_catalogue_loads() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        assert_eq!(catalogue.departments().len(), 9);
        assert_eq!(catalogue.hierarchy().len(), 5);
        assert_eq!(catalogue.exclusions().len(), 15);
    }

    #[test]
    fn test_embedded_department_priority_order() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let names: Vec<&str> = catalogue
            .departments()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Ejecutivo",
                "Marketing",
                "Ventas",
                "Recursos Humanos",
                "Finanzas",
                "Legal",
                "Producto",
                "Tecnologia",
                "Operaciones"
            ]
        );
    }

    #[test]
    fn test_embedded_hierarchy_is_most_senior_first() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let levels: Vec<HierarchyLevel> = catalogue.hierarchy().iter().map(|t| t.level).collect();
        assert_eq!(
            levels,
            vec![
                HierarchyLevel::CSuite,
                HierarchyLevel::VpDirector,
                HierarchyLevel::Manager,
                HierarchyLevel::Lead,
                HierarchyLevel::Specialist
            ]
        );
    }

    #[test]
    fn test_embedded_builtin_exclusions() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let labels: Vec<&str> = catalogue.exclusions().iter().map(ExclusionTerm::label).collect();
        assert_eq!(
            labels,
            vec![
                "junior", "jr", "trainee", "becario", "intern", "assistant", "asistente",
                "community", "artist", "art", "design", "diseño", "advisor", "paid", "customer"
            ]
        );
    }

    fn keywords_shadowed_by_exclusions(mode: ExclusionMode) -> BTreeSet<(String, String)> {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let mut shadowed = BTreeSet::new();
        for department in &catalogue.document().departments {
            let keywords = department
                .must
                .iter()
                .chain(department.subdivisions.iter().flat_map(|s| &s.keywords))
                .chain(department.specials.iter().flat_map(|s| &s.keywords));
            for keyword in keywords {
                let title = NormalizedTitle::new(keyword);
                if catalogue.exclusions().iter().any(|term| term.matches(&title, mode)) {
                    shadowed.insert((department.name.clone(), keyword.clone()));
                }
            }
        }
        shadowed
    }

    #[test]
    fn test_keywords_unreachable_under_substring_exclusion() {
        // "art" sits inside "partner"; these only fire in word mode.
        let expected: BTreeSet<(String, String)> = [
            ("Recursos Humanos", "business partner"),
            ("Ventas", "partnerships"),
        ]
        .into_iter()
        .map(|(d, k)| (d.to_string(), k.to_string()))
        .collect();

        assert_eq!(keywords_shadowed_by_exclusions(ExclusionMode::Substring), expected);
        assert!(keywords_shadowed_by_exclusions(ExclusionMode::Word).is_empty());
    }

    #[test]
    fn test_minimal_document_compiles() {
        let catalogue = RuleCatalogue::from_json(&minimal().to_string()).unwrap();
        assert_eq!(catalogue.version(), "test");
        assert_eq!(catalogue.departments()[0].name, "Marketing");
        assert_eq!(catalogue.departments()[0].default_role, "marketing");
    }

    #[test]
    fn test_duplicate_department_rejected() {
        let mut doc = minimal();
        let dup = doc["departments"][0].clone();
        doc["departments"].as_array_mut().unwrap().push(dup);
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateDepartment(name) if name == "Marketing"));
    }

    #[test]
    fn test_duplicate_tier_rejected() {
        let mut doc = minimal();
        let dup = doc["hierarchy"][0].clone();
        doc["hierarchy"].as_array_mut().unwrap().push(dup);
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateTier(HierarchyLevel::Manager)));
    }

    #[test]
    fn test_bad_keyword_names_its_location() {
        let mut doc = minimal();
        doc["departments"][0]["must"] = json!(["marketing", "* officer"]);
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("department 'Marketing', must keywords"));
    }

    #[test]
    fn test_unknown_level_is_a_json_error() {
        let mut doc = minimal();
        doc["hierarchy"][0]["level"] = json!("Intern");
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogueError::Json(_)));
    }

    #[test]
    fn test_empty_departments_rejected() {
        let mut doc = minimal();
        doc["departments"] = json!([]);
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogueError::NoDepartments));
    }

    #[test]
    fn test_department_without_keywords_rejected() {
        let mut doc = minimal();
        doc["departments"][0]["must"] = json!([]);
        let err = RuleCatalogue::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogueError::Invalid(_)));
    }

    #[test]
    fn test_document_round_trips_through_get_rules_shape() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let value = serde_json::to_value(catalogue.document()).unwrap();
        assert_eq!(value["departments"][1]["roles"]["Manager"], "gerentes de marketing");
        assert_eq!(value["hierarchy"][1]["level"], "VP/Director");
    }
}
