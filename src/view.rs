//! Pure derivation of the displayed product list from accumulated state.
//! Never mutates its input; recomputed after any relevant state change.

use std::collections::HashSet;

use crate::catalog::{Product, SortMode};

/// Refine, de-duplicate, and order the accumulated products for display.
///
/// 1. The term is trimmed and lowercased; an empty term skips refinement.
/// 2. Refinement keeps products whose lowercased title contains the term.
/// 3. One entry per id, first-seen order; later duplicates from overlapping
///    pages are dropped.
/// 4. Sorting is stable, so re-applying a mode is a no-op.
pub fn visible_products(products: &[Product], search: &str, sort: SortMode) -> Vec<Product> {
    let term = search.trim().to_lowercase();

    let mut seen = HashSet::new();
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| term.is_empty() || p.title.to_lowercase().contains(&term))
        .filter(|p| seen.insert(p.id))
        .cloned()
        .collect();

    match sort {
        SortMode::Featured => {}
        SortMode::PriceAsc => visible.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => visible.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::RatingAsc => visible.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortMode::RatingDesc => visible.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, price: f64, rating: f64) -> Product {
        Product {
            id,
            title: title.into(),
            description: String::new(),
            price,
            rating,
            category: "misc".into(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn refinement_is_case_insensitive_substring_on_title() {
        let products = vec![
            product(1, "iPhone 13", 999.0, 4.7),
            product(2, "Kettle", 24.0, 4.1),
            product(3, "Headphone Set", 79.0, 4.4),
        ];

        let titles: Vec<_> = visible_products(&products, "phone", SortMode::Featured)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["iPhone 13", "Headphone Set"]);
    }

    #[test]
    fn empty_and_whitespace_terms_skip_refinement() {
        let products = vec![product(1, "A", 1.0, 1.0), product(2, "B", 2.0, 2.0)];
        assert_eq!(visible_products(&products, "", SortMode::Featured).len(), 2);
        assert_eq!(visible_products(&products, "   ", SortMode::Featured).len(), 2);
    }

    #[test]
    fn duplicates_from_overlapping_pages_collapse_to_first_seen() {
        let products = vec![
            product(1, "First", 1.0, 1.0),
            product(2, "Second", 2.0, 2.0),
            product(1, "First again", 9.0, 9.0),
        ];

        let visible = visible_products(&products, "", SortMode::Featured);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].title, "First");
        assert_eq!(visible[1].title, "Second");
    }

    #[test]
    fn price_asc_orders_numerically() {
        let products = vec![
            product(1, "a", 30.0, 1.0),
            product(2, "b", 10.0, 2.0),
            product(3, "c", 20.0, 3.0),
        ];

        let prices: Vec<f64> = visible_products(&products, "", SortMode::PriceAsc)
            .iter()
            .map(|p| p.price)
            .collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let products = vec![
            product(1, "a", 30.0, 4.0),
            product(2, "b", 10.0, 4.0),
            product(3, "c", 20.0, 4.0),
            product(4, "d", 10.0, 4.0),
        ];

        let once = visible_products(&products, "", SortMode::PriceAsc);
        let twice = visible_products(&once, "", SortMode::PriceAsc);
        assert_eq!(once, twice);
    }

    #[test]
    fn rating_desc_and_featured_modes() {
        let products = vec![
            product(1, "a", 1.0, 2.5),
            product(2, "b", 2.0, 4.9),
            product(3, "c", 3.0, 3.7),
        ];

        let featured: Vec<u64> = visible_products(&products, "", SortMode::Featured)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(featured, vec![1, 2, 3], "featured keeps insertion order");

        let by_rating: Vec<u64> = visible_products(&products, "", SortMode::RatingDesc)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_rating, vec![2, 3, 1]);
    }

    #[test]
    fn input_is_left_untouched() {
        let products = vec![product(1, "a", 30.0, 1.0), product(2, "b", 10.0, 2.0)];
        let before = products.clone();
        let _ = visible_products(&products, "a", SortMode::PriceAsc);
        assert_eq!(products, before);
    }
}
