//! Role-generic resolver: presentation label for a classified title.
//!
//! Lookup order: the department's special roles, then the
//! (department, hierarchy level) table, then the department default.

use crate::classifier::hierarchy::HierarchyLevel;
use crate::classifier::normalize::NormalizedTitle;
use crate::rules::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleMatch<'a> {
    pub label: &'a str,
    /// Set when a special role override produced the label.
    pub special_keyword: Option<&'a str>,
}

pub fn resolve_role<'a>(
    department: &'a Department,
    level: Option<HierarchyLevel>,
    title: &NormalizedTitle,
) -> RoleMatch<'a> {
    for special in &department.specials {
        if let Some(pattern) = special.keywords.first_match(&title.tokens) {
            return RoleMatch {
                label: &special.label,
                special_keyword: Some(pattern.source()),
            };
        }
    }

    let label = level
        .and_then(|level| department.roles.get(&level))
        .unwrap_or(&department.default_role);

    RoleMatch {
        label,
        special_keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleCatalogue;

    fn resolve(department: &str, level: Option<HierarchyLevel>, title: &str) -> (String, bool) {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let department = catalogue
            .departments()
            .iter()
            .find(|d| d.name == department)
            .unwrap();
        let role = resolve_role(department, level, &NormalizedTitle::new(title));
        (role.label.to_string(), role.special_keyword.is_some())
    }

    #[test]
    fn test_table_lookup_by_department_and_level() {
        assert_eq!(
            resolve("Marketing", Some(HierarchyLevel::Manager), "Marketing Manager"),
            ("gerentes de marketing".to_string(), false)
        );
        assert_eq!(
            resolve("Marketing", Some(HierarchyLevel::VpDirector), "Director de Marketing"),
            ("directores de marketing".to_string(), false)
        );
    }

    #[test]
    fn test_special_role_overrides_table() {
        assert_eq!(
            resolve("Ejecutivo", Some(HierarchyLevel::CSuite), "Chief Executive Officer"),
            ("CEOs".to_string(), true)
        );
        assert_eq!(
            resolve("Tecnologia", Some(HierarchyLevel::CSuite), "CTO"),
            ("CTOs".to_string(), true)
        );
    }

    #[test]
    fn test_falls_back_to_department_default_without_level() {
        assert_eq!(
            resolve("Marketing", None, "Marketing"),
            ("profesionales de marketing".to_string(), false)
        );
    }
}
