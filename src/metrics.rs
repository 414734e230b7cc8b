use serde::Serialize;

use crate::tally::CategoryCount;
use crate::types::CategoryLabel;

/// Proportional view of a category tally, for pie/doughnut charts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryProportions {
    /// Sum of all category counts.
    pub total: u64,
    /// Per-category shares in tally order.
    pub per_category: Vec<CategoryShare>,
}

/// One category's share of the total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category label as it appeared in the input.
    pub label: CategoryLabel,
    /// Records carrying this label.
    pub count: u64,
    /// Fraction in `[0, 1]`.
    pub share: f64,
}

/// Compute shares from a tally. Returns `None` for an empty tally.
///
/// Order is preserved because colors downstream are assigned by position.
pub fn category_proportions(counts: &[CategoryCount]) -> Option<CategoryProportions> {
    if counts.is_empty() {
        return None;
    }
    let total: u64 = counts.iter().map(|entry| entry.count).sum();
    let per_category = counts
        .iter()
        .map(|entry| CategoryShare {
            label: entry.label.clone(),
            count: entry.count,
            share: if total == 0 {
                0.0
            } else {
                entry.count as f64 / total as f64
            },
        })
        .collect();
    Some(CategoryProportions {
        total,
        per_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(label: &str, count: u64) -> CategoryCount {
        CategoryCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn equal_counts_split_evenly() {
        let counts = vec![count("Solo", 2), count("Couples", 2)];
        let proportions = category_proportions(&counts).expect("proportions");
        assert_eq!(proportions.total, 4);
        assert_eq!(proportions.per_category.len(), 2);
        assert!(
            proportions
                .per_category
                .iter()
                .all(|entry| (entry.share - 0.5).abs() < 1e-6)
        );
    }

    #[test]
    fn proportions_keep_tally_order() {
        let counts = vec![count("Family", 1), count("Business", 4), count("Solo", 3)];
        let proportions = category_proportions(&counts).expect("proportions");
        let labels: Vec<&str> = proportions
            .per_category
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Family", "Business", "Solo"]);
        assert!((proportions.per_category[1].share - 0.5).abs() < 1e-9);
        let share_sum: f64 = proportions.per_category.iter().map(|e| e.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_counts_get_zero_share() {
        let proportions = category_proportions(&[count("Solo", 0)]).expect("proportions");
        assert_eq!(proportions.total, 0);
        assert_eq!(proportions.per_category[0].share, 0.0);
    }

    #[test]
    fn empty_tally_has_no_proportions() {
        assert!(category_proportions(&[]).is_none());
    }
}
