//! Sorts ingredient names into shopping categories by substring rules.
//!
//! Rules are tried in order and matching is case-sensitive, so an item lands
//! in the first category whose keyword it contains. `pepper` is listed for
//! both vegetables and spices; the vegetable rule wins.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Proteins,
    Vegetables,
    Fruits,
    Grains,
    Dairy,
    Pantry,
    Snacks,
    Spices,
}

impl Category {
    /// Display order of the list.
    pub const ALL: [Category; 8] = [
        Category::Proteins,
        Category::Vegetables,
        Category::Fruits,
        Category::Grains,
        Category::Dairy,
        Category::Pantry,
        Category::Snacks,
        Category::Spices,
    ];
}

const RULES: &[(Category, &[&str])] = &[
    (Category::Proteins, &["chicken", "salmon", "tuna", "egg"]),
    (
        Category::Vegetables,
        &["spinach", "broccoli", "kale", "cucumber", "tomato", "pepper", "zucchini"],
    ),
    (Category::Fruits, &["berry", "avocado"]),
    (Category::Grains, &["rice", "quinoa", "bread"]),
    (Category::Dairy, &["yogurt", "cheese", "feta"]),
    (Category::Pantry, &["oil", "honey", "sauce"]),
    (Category::Snacks, &["almond", "hummus"]),
    (Category::Spices, &["salt", "pepper", "herb"]),
];

/// First matching category; anything unmatched is pantry.
pub fn categorize(ingredient: &str) -> Category {
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| ingredient.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Pantry)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryItems {
    pub category: Category,
    pub items: Vec<String>,
}

/// Every category in display order, each holding distinct items in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    pub categories: Vec<CategoryItems>,
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self {
            categories: Category::ALL
                .iter()
                .map(|&category| CategoryItems {
                    category,
                    items: Vec::new(),
                })
                .collect(),
        }
    }
}

impl ShoppingList {
    pub fn build<'a>(ingredients: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = Self::default();
        for ingredient in ingredients {
            list.insert(ingredient);
        }
        list
    }

    /// Returns `false` if the item was already listed under its category.
    pub fn insert(&mut self, ingredient: &str) -> bool {
        let category = categorize(ingredient);
        let Some(bucket) = self.categories.iter_mut().find(|c| c.category == category) else {
            return false;
        };
        if bucket.items.iter().any(|i| i == ingredient) {
            return false;
        }
        bucket.items.push(ingredient.to_string());
        true
    }

    #[cfg(test)]
    pub fn items(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    /// Keeps items containing `term`, ignoring case; categories stay even when emptied.
    pub fn filtered(&self, term: &str) -> Self {
        let term = term.to_lowercase();
        if term.is_empty() {
            return self.clone();
        }
        Self {
            categories: self
                .categories
                .iter()
                .map(|c| CategoryItems {
                    category: c.category,
                    items: c
                        .items
                        .iter()
                        .filter(|i| i.to_lowercase().contains(&term))
                        .cloned()
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
