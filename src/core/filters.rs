use crate::models::{EnrichedOffering, FilterCriteria};

/// Check one offering against the filter criteria
///
/// All criteria must hold at once. An absent rating counts as zero, so any
/// positive rating floor excludes unrated offerings. An absent price ceiling
/// passes every price.
#[inline]
pub fn matches_criteria(item: &EnrichedOffering, criteria: &FilterCriteria) -> bool {
    // Dietary restriction
    if criteria.vegetarian_only && !item.is_vegetarian {
        return false;
    }

    // Price ceiling (inclusive)
    if let Some(max_price) = criteria.max_price {
        if item.price > max_price {
            return false;
        }
    }

    // Rating floor (inclusive)
    if item.rating_or_default() < criteria.min_rating {
        return false;
    }

    true
}

/// Apply the criteria to a full offering set
///
/// Pure over its inputs: re-running after the offering set or the criteria
/// change always reflects the new values. An empty result is a valid result,
/// not an error.
pub fn apply_filters(
    items: Vec<EnrichedOffering>,
    criteria: &FilterCriteria,
) -> Vec<EnrichedOffering> {
    items
        .into_iter()
        .filter(|item| matches_criteria(item, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn offering(id: &str, price: &str, rating: Option<f64>, vegetarian: bool) -> EnrichedOffering {
        EnrichedOffering {
            id: id.to_string(),
            title: format!("Item {}", id),
            description: String::new(),
            price: price.parse().unwrap(),
            rating,
            is_vegetarian: vegetarian,
            owner_ref: "provider_1".to_string(),
            image_ref: String::new(),
            category: None,
            provider_display_name: "Provider 1".to_string(),
            distance_km: None,
        }
    }

    fn criteria(vegetarian_only: bool, max_price: Option<&str>, min_rating: f64) -> FilterCriteria {
        FilterCriteria {
            vegetarian_only,
            max_price: max_price.map(|p| p.parse::<Decimal>().unwrap()),
            min_rating,
        }
    }

    #[test]
    fn test_default_criteria_pass_everything() {
        let items = vec![
            offering("a", "150", Some(4.2), true),
            offering("b", "999", None, false),
        ];

        let filtered = apply_filters(items.clone(), &FilterCriteria::default());

        assert_eq!(filtered.len(), items.len());
        let before: Vec<&str> = items.iter().map(|o| o.id.as_str()).collect();
        let after: Vec<&str> = filtered.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_vegetarian_flag_excludes_non_vegetarian() {
        let items = vec![
            offering("veg", "100", Some(4.0), true),
            offering("non_veg", "100", Some(4.8), false),
        ];

        let filtered = apply_filters(items, &criteria(true, None, 0.0));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "veg");
    }

    #[test]
    fn test_price_ceiling_excludes_expensive_vegetarian_item() {
        let items = vec![
            offering("cheap_veg", "80", Some(4.0), true),
            offering("pricey_veg", "150", Some(4.9), true),
        ];

        let filtered = apply_filters(items, &criteria(true, Some("100"), 0.0));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "cheap_veg");
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let items = vec![offering("at_limit", "100", None, false)];

        let filtered = apply_filters(items, &criteria(false, Some("100"), 0.0));

        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_rating_floor_excludes_unrated() {
        let items = vec![
            offering("rated", "100", Some(4.5), false),
            offering("unrated", "100", None, false),
        ];

        let filtered = apply_filters(items, &criteria(false, None, 4.0));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "rated");
    }

    #[test]
    fn test_filtered_output_is_subset_of_input() {
        let items = vec![
            offering("a", "80", Some(2.0), true),
            offering("b", "120", Some(4.0), false),
            offering("c", "60", Some(4.5), true),
        ];
        let input_ids: Vec<String> = items.iter().map(|o| o.id.clone()).collect();

        let filtered = apply_filters(items, &criteria(true, Some("100"), 3.0));

        for item in &filtered {
            assert!(input_ids.contains(&item.id));
        }
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "c");
    }

    #[test]
    fn test_empty_result_is_valid() {
        let items = vec![offering("a", "500", Some(1.0), false)];

        let filtered = apply_filters(items, &criteria(true, Some("100"), 4.5));

        assert!(filtered.is_empty());
    }
}
