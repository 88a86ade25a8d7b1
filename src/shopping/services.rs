use std::collections::HashMap;

use super::{
    categorize::ShoppingList,
    dto::{CategoryView, ItemView, ShoppingListView},
    stock::InStock,
};
use crate::plans::repo_types::WeeklyMealPlanRow;

/// Categorised list of the plan's ingredients with the first amount given for each.
pub fn plan_list(plan: &WeeklyMealPlanRow) -> (ShoppingList, HashMap<String, String>) {
    let ingredients = plan.ingredients().unwrap_or(&[]);
    let mut amounts = HashMap::new();
    for item in ingredients {
        amounts
            .entry(item.ingredient.clone())
            .or_insert_with(|| item.amount.clone());
    }
    let list = ShoppingList::build(ingredients.iter().map(|i| i.ingredient.as_str()));
    (list, amounts)
}

pub fn list_view(
    list: &ShoppingList,
    amounts: &HashMap<String, String>,
    stock: InStock,
    search: Option<&str>,
) -> ShoppingListView {
    let shown = match search {
        Some(term) => list.filtered(term),
        None => list.clone(),
    };

    let categories: Vec<CategoryView> = shown
        .categories
        .into_iter()
        .map(|c| CategoryView {
            category: c.category,
            items: c
                .items
                .into_iter()
                .map(|name| ItemView {
                    amount: amounts.get(&name).cloned(),
                    in_stock: stock.contains(&name),
                    name,
                })
                .collect(),
        })
        .collect();

    let to_buy = categories
        .iter()
        .flat_map(|c| &c.items)
        .filter(|i| !i.in_stock)
        .count();

    ShoppingListView::List {
        categories,
        in_stock: stock,
        to_buy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shopping::categorize::Category, testing::sample_plan};
    use uuid::Uuid;

    fn names(view: &ShoppingListView, category: Category) -> Vec<String> {
        let ShoppingListView::List { categories, .. } = view else {
            panic!("expected a list");
        };
        categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.items.iter().map(|i| i.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn plan_ingredients_keep_first_amount() {
        let plan = sample_plan(Uuid::new_v4());
        let (list, amounts) = plan_list(&plan);
        assert_eq!(list.items(Category::Proteins), ["salmon fillet"]);
        assert_eq!(amounts["salmon fillet"], "200g");
    }

    #[test]
    fn stock_marks_items_and_reduces_count() {
        let plan = sample_plan(Uuid::new_v4());
        let (list, amounts) = plan_list(&plan);
        let total = list.len();

        let view = list_view(&list, &amounts, InStock::new(vec!["olive oil".into()]), None);
        let ShoppingListView::List { to_buy, categories, .. } = &view else {
            panic!("expected a list");
        };
        assert_eq!(*to_buy, total - 1);
        let oil = categories
            .iter()
            .flat_map(|c| &c.items)
            .find(|i| i.name == "olive oil")
            .unwrap();
        assert!(oil.in_stock);
        assert_eq!(oil.amount.as_deref(), Some("30g"));
    }

    #[test]
    fn search_narrows_items() {
        let plan = sample_plan(Uuid::new_v4());
        let (list, amounts) = plan_list(&plan);
        let view = list_view(&list, &amounts, InStock::default(), Some("SALM"));
        assert_eq!(names(&view, Category::Proteins), ["salmon fillet"]);
        assert!(names(&view, Category::Pantry).is_empty());
    }
}
