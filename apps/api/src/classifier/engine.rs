//! Classification engine: sequences normalization, exclusion, department,
//! subdivision, hierarchy and role resolution for one title.
//!
//! Pure and synchronous: the catalogue is borrowed, nothing is mutated, and
//! every input (however odd) yields a well-formed result in a single pass.

use tracing::debug;

use crate::classifier::department::{match_department, match_subdivision};
use crate::classifier::exclusion::{
    parse_custom_excludes, ExclusionError, ExclusionMode, ExclusionSet, ExclusionTerm,
};
use crate::classifier::hierarchy::match_hierarchy;
use crate::classifier::models::{ClassificationResult, Why};
use crate::classifier::normalize::NormalizedTitle;
use crate::classifier::role::resolve_role;
use crate::rules::RuleCatalogue;

#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    catalogue: &'a RuleCatalogue,
    mode: ExclusionMode,
}

impl<'a> Classifier<'a> {
    pub fn new(catalogue: &'a RuleCatalogue, mode: ExclusionMode) -> Self {
        Self { catalogue, mode }
    }

    /// Convenience over [`Classifier::classify`] taking the raw comma-separated
    /// `excludes` string.
    pub fn classify_with_excludes(
        &self,
        job_title: &str,
        excludes: &str,
    ) -> Result<ClassificationResult, ExclusionError> {
        let custom = parse_custom_excludes(excludes)?;
        Ok(self.classify(job_title, &custom))
    }

    pub fn classify(&self, job_title: &str, custom_excludes: &[ExclusionTerm]) -> ClassificationResult {
        let title = NormalizedTitle::new(job_title);

        let exclusions = ExclusionSet::new(self.catalogue.exclusions(), custom_excludes);
        if let Some(term) = exclusions.check(&title, self.mode) {
            debug!(title = job_title, excluded_by = term.label(), "title excluded");
            return ClassificationResult::negative(job_title, Why::excluded(term.label()));
        }

        if title.is_empty() {
            return ClassificationResult::negative(job_title, Why::no_department());
        }

        let Some(hit) = match_department(self.catalogue.departments(), &title) else {
            debug!(title = job_title, "no department matched");
            return ClassificationResult::negative(job_title, Why::no_department());
        };
        let department = hit.department;

        if let Some(term) = ExclusionSet::new(&department.exclude, &[]).check(&title, self.mode) {
            debug!(
                title = job_title,
                department = %department.name,
                excluded_by = term.label(),
                "title excluded by department rule"
            );
            let why = Why {
                must: Some(hit.area_keyword.is_some()),
                excluded_in: Some(department.name.clone()),
                ..Why::excluded(term.label())
            };
            return ClassificationResult::negative(job_title, why);
        }

        let subdivision = match_subdivision(department, &title);
        let seniority = match_hierarchy(self.catalogue.hierarchy(), &title);
        let role = resolve_role(department, seniority.map(|s| s.level), &title);

        let why = Why {
            exclude: false,
            must: Some(hit.area_keyword.is_some()),
            seniority: Some(seniority.is_some()),
            matched: Some(matched_label(
                hit.area_keyword.is_some(),
                seniority.is_some(),
                role.special_keyword.is_some(),
            )),
            area_keyword: hit.area_keyword.map(str::to_string),
            seniority_keyword: seniority.map(|s| s.keyword.to_string()),
            special_keyword: role.special_keyword.map(str::to_string),
            ..Why::default()
        };

        let hierarchy_level = seniority
            .map(|s| s.level.as_str().to_string())
            .unwrap_or_default();

        debug!(
            title = job_title,
            department = %department.name,
            subdivision,
            hierarchy_level = %hierarchy_level,
            role = role.label,
            "title classified"
        );

        ClassificationResult {
            input: job_title.to_string(),
            is_icp: true,
            department: department.name.clone(),
            subdivision: subdivision.to_string(),
            hierarchy_level,
            role_generic: role.label.to_string(),
            why,
        }
    }
}

/// `"area"`, `"area+seniority"`, `"area+seniority+special"`, `"special"`, ...
fn matched_label(area: bool, seniority: bool, special: bool) -> String {
    let parts: Vec<&str> = [(area, "area"), (seniority, "seniority"), (special, "special")]
        .into_iter()
        .filter_map(|(fired, name)| fired.then_some(name))
        .collect();
    parts.join("+")
}
