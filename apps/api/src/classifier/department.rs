//! Department and subdivision matchers.
//!
//! Departments are tried in catalogue priority order and the first hit wins,
//! so a title naming two areas always lands in the earlier one. The shipped
//! order is Ejecutivo, Marketing, Ventas, Recursos Humanos, Finanzas, Legal,
//! Producto, Tecnologia, Operaciones.

use crate::classifier::normalize::NormalizedTitle;
use crate::rules::{Department, DEFAULT_SUBDIVISION};

#[derive(Debug, Clone, Copy)]
pub struct DepartmentMatch<'a> {
    pub department: &'a Department,
    /// The "must" phrase that matched; `None` when the department was reached
    /// only through one of its special roles.
    pub area_keyword: Option<&'a str>,
}

pub fn match_department<'a>(
    departments: &'a [Department],
    title: &NormalizedTitle,
) -> Option<DepartmentMatch<'a>> {
    departments.iter().find_map(|department| {
        if let Some(pattern) = department.must.first_match(&title.tokens) {
            return Some(DepartmentMatch {
                department,
                area_keyword: Some(pattern.source()),
            });
        }

        department
            .specials
            .iter()
            .any(|special| special.keywords.first_match(&title.tokens).is_some())
            .then_some(DepartmentMatch {
                department,
                area_keyword: None,
            })
    })
}

/// First subdivision of `department` whose keywords match, else `"General"`.
pub fn match_subdivision<'a>(department: &'a Department, title: &NormalizedTitle) -> &'a str {
    department
        .subdivisions
        .iter()
        .find(|sub| sub.keywords.first_match(&title.tokens).is_some())
        .map(|sub| sub.name.as_str())
        .unwrap_or(DEFAULT_SUBDIVISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleCatalogue;

    fn department_of(title: &str) -> Option<String> {
        let catalogue = RuleCatalogue::embedded().unwrap();
        match_department(catalogue.departments(), &NormalizedTitle::new(title))
            .map(|m| m.department.name.clone())
    }

    fn subdivision_of(title: &str) -> String {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let normalized = NormalizedTitle::new(title);
        let hit = match_department(catalogue.departments(), &normalized).unwrap();
        match_subdivision(hit.department, &normalized).to_string()
    }

    #[test]
    fn test_each_department_is_reachable() {
        assert_eq!(department_of("Chief Executive Officer").as_deref(), Some("Ejecutivo"));
        assert_eq!(department_of("Marketing Manager").as_deref(), Some("Marketing"));
        assert_eq!(department_of("Head of Sales").as_deref(), Some("Ventas"));
        assert_eq!(department_of("Directora de RRHH").as_deref(), Some("Recursos Humanos"));
        assert_eq!(department_of("Finance Manager").as_deref(), Some("Finanzas"));
        assert_eq!(department_of("General Counsel").as_deref(), Some("Legal"));
        assert_eq!(department_of("Head of Product").as_deref(), Some("Producto"));
        assert_eq!(department_of("IT Manager").as_deref(), Some("Tecnologia"));
        assert_eq!(department_of("Operations Director").as_deref(), Some("Operaciones"));
    }

    #[test]
    fn test_executive_outranks_generic_department_titles() {
        assert_eq!(department_of("General Manager").as_deref(), Some("Ejecutivo"));
        assert_eq!(
            department_of("General Manager, Operations").as_deref(),
            Some("Ejecutivo")
        );
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        // Marketing precedes Tecnologia.
        assert_eq!(
            department_of("Marketing Technology Manager").as_deref(),
            Some("Marketing")
        );
        // Recursos Humanos precedes Tecnologia, so "técnico" does not win.
        assert_eq!(department_of("Técnico RRHH").as_deref(), Some("Recursos Humanos"));
    }

    #[test]
    fn test_short_keywords_match_whole_words_only() {
        assert_eq!(department_of("Head of IT").as_deref(), Some("Tecnologia"));
        // "it" must not be found inside "Digital", nor "cto" inside "Director".
        assert_eq!(department_of("Director"), None);
    }

    #[test]
    fn test_special_role_qualifies_department() {
        let catalogue = RuleCatalogue::embedded().unwrap();
        let title = NormalizedTitle::new("CPO");
        let hit = match_department(catalogue.departments(), &title).unwrap();
        assert_eq!(hit.department.name, "Recursos Humanos");
        assert_eq!(hit.area_keyword, None);
    }

    #[test]
    fn test_no_department() {
        assert_eq!(department_of("Barista"), None);
        assert_eq!(department_of(""), None);
    }

    #[test]
    fn test_subdivision_defaults_to_general() {
        assert_eq!(subdivision_of("Marketing Manager"), "General");
        assert_eq!(subdivision_of("CEO"), "General");
    }

    #[test]
    fn test_subdivision_matches_first_group() {
        assert_eq!(subdivision_of("SEO Manager"), "Digital");
        assert_eq!(subdivision_of("Talent Acquisition Manager"), "Talento");
        assert_eq!(subdivision_of("Lead Android Engineer"), "Ingeniería y Desarrollo");
        assert_eq!(subdivision_of("CISO"), "Ciberseguridad");
        assert_eq!(subdivision_of("Head of Project"), "Proyectos");
    }
}
