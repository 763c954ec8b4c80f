use crate::recipe::Recipe;

/// Recipes whose title or description contains `term`, ignoring case.
///
/// A term that is empty after trimming selects the whole collection. A
/// non-blank term is matched as given, surrounding whitespace included.
/// Collection order is preserved.
pub fn filter_recipes(recipes: &[Recipe], term: &str) -> Vec<Recipe> {
    if term.trim().is_empty() {
        return recipes.to_vec();
    }

    let needle = term.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| recipe.matches(&needle))
        .cloned()
        .collect()
}
