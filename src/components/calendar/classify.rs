use super::models::Category;
use std::collections::BTreeSet;

const BIRTHDAY: &[&str] = &["birthday", "bday", "anniversaire"];
const WORKSHOP: &[&str] = &["workshop", "atelier", "formation", "training"];
const ON_SITE: &[&str] = &["on site", "onsite"];
const AT_HOME: &[&str] = &["at home", "athome", "from home", "remote"];

/// Keyword rules, matched against lowercased text
const RULES: [(Category, &[&str]); 4] = [
    (Category::Birthday, BIRTHDAY),
    (Category::Workshop, WORKSHOP),
    (Category::OnSite, ON_SITE),
    (Category::AtHome, AT_HOME),
];

/// Tag an event from its summary and description
///
/// The two fields are searched separately so that a token can never be
/// formed across the boundary between them.
pub fn classify(summary: &str, description: &str) -> BTreeSet<Category> {
    let summary = summary.to_lowercase();
    let description = description.to_lowercase();

    RULES
        .iter()
        .filter(|(_, tokens)| {
            tokens
                .iter()
                .any(|token| summary.contains(token) || description.contains(token))
        })
        .map(|(category, _)| *category)
        .collect()
}
