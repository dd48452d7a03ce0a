use super::pivot::RecipeIngredients;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// How often each ingredient is used across recipes.
#[derive(Debug, Clone, Default)]
pub struct IngredientUsage {
    counts: IndexMap<String, usize>,
}

impl IngredientUsage {
    pub fn from_groups(groups: &[RecipeIngredients]) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for ingredient in groups.iter().flat_map(|group| &group.ingredients) {
            *counts.entry(ingredient.name.clone()).or_default() += 1;
        }
        Self { counts }
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Ingredients used at least `min_uses` times, most used first. Ties keep
    /// the order in which ingredients were first seen.
    pub fn popular(&self, min_uses: usize, limit: usize) -> Vec<(&str, usize)> {
        let mut popular: Vec<(&str, usize)> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= min_uses)
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        popular.sort_by(|a, b| b.1.cmp(&a.1));
        popular.truncate(limit);
        popular
    }
}

/// Number of recipes per ingredient count.
pub fn count_distribution(groups: &[RecipeIngredients]) -> BTreeMap<usize, usize> {
    let mut distribution = BTreeMap::new();
    for group in groups {
        *distribution.entry(group.ingredients.len()).or_default() += 1;
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::parser::IngredientLine;
    use crate::recipes::pivot::group_by_recipe;

    fn groups() -> Vec<RecipeIngredients> {
        let rows = [
            ("山药粥", "大米"),
            ("山药粥", "山药"),
            ("百合粥", "大米"),
            ("百合粥", "百合"),
            ("红枣粥", "大米"),
            ("红枣粥", "红枣"),
            ("红枣茶", "红枣"),
            ("姜茶", "生姜"),
        ];
        let lines: Vec<IngredientLine> = rows
            .iter()
            .map(|(recipe, name)| IngredientLine {
                recipe_title: recipe.to_string(),
                ingredient_name: name.to_string(),
                amount: "10g".to_string(),
                note: None,
            })
            .collect();
        group_by_recipe(&lines)
    }

    #[test]
    fn counts_every_use() {
        let usage = IngredientUsage::from_groups(&groups());
        assert_eq!(usage.distinct(), 5);
        assert_eq!(usage.count("大米"), 3);
        assert_eq!(usage.count("红枣"), 2);
        assert_eq!(usage.count("人参"), 0);
    }

    #[test]
    fn popular_filters_and_orders() {
        let usage = IngredientUsage::from_groups(&groups());
        assert_eq!(usage.popular(3, 10), vec![("大米", 3)]);
        assert_eq!(usage.popular(1, 2), vec![("大米", 3), ("红枣", 2)]);
    }

    #[test]
    fn distribution_counts_recipes_by_size() {
        let distribution = count_distribution(&groups());
        assert_eq!(distribution.get(&2), Some(&3));
        assert_eq!(distribution.get(&1), Some(&2));
    }
}
