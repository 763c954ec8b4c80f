use recipe_store::{Recipe, RecipeId};

pub fn pasta() -> Recipe {
    Recipe::new(1, "Pasta", "Tomato")
}

pub fn salad() -> Recipe {
    Recipe::new(2, "Salad", "Greens")
}

/// Recipes A, B, C, D with ids 1 through 4.
pub fn abcd() -> Vec<Recipe> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, title)| Recipe::new(i as RecipeId + 1, *title, format!("Recipe {}", title)))
        .collect()
}

pub fn ids(recipes: &[Recipe]) -> Vec<RecipeId> {
    recipes.iter().map(|recipe| recipe.id).collect()
}
