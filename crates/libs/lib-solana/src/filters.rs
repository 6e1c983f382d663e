//! # Marketplace Filters
//!
//! Pure filtering and sorting over an in-memory list of NFT details. The
//! input list is never mutated; every call produces a fresh, filtered copy,
//! so clearing a filter is just calling again without it.
//!
//! Prices are stored in lamports and compared in SOL
//! (`lamports / 1_000_000_000`), matching what buyers type into the
//! min/max boxes.

use serde::{Deserialize, Serialize};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A marketplace asset as shown to buyers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftDetail {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Collection key, when the NFT belongs to one
    pub group: Option<String>,
    pub seller: String,
    pub price_lamports: u64,
    /// Address of the listing account
    pub listing: String,
}

impl NftDetail {
    pub fn price_sol(&self) -> f64 {
        self.price_lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

/// Sort order for filtered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Arrival order, untouched
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    Name,
}

/// Filter criteria. Absent fields are pass-through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketFilter {
    /// Case-insensitive substring match on the asset name
    pub search: Option<String>,
    /// Inclusive lower price bound, in SOL
    pub min_price: Option<f64>,
    /// Inclusive upper price bound, in SOL
    pub max_price: Option<f64>,
    /// Exact collection match
    pub group: Option<String>,
    /// Exact seller match
    pub seller: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

/// UI selectors send a sentinel instead of omitting the parameter.
fn is_sentinel(value: &str) -> bool {
    matches!(value, "all" | "all_groups" | "all_sellers")
}

/// Apply all filter criteria, then sort. Sorts are stable, so assets that
/// compare equal keep their arrival order.
pub fn apply_filters(assets: &[NftDetail], filter: &MarketFilter) -> Vec<NftDetail> {
    let mut filtered: Vec<NftDetail> = assets
        .iter()
        .filter(|asset| {
            if let Some(term) = &filter.search {
                if !term.is_empty()
                    && !asset.name.to_lowercase().contains(&term.to_lowercase())
                {
                    return false;
                }
            }
            if let Some(min) = filter.min_price {
                if asset.price_sol() < min {
                    return false;
                }
            }
            if let Some(max) = filter.max_price {
                if asset.price_sol() > max {
                    return false;
                }
            }
            if let Some(group) = &filter.group {
                if !is_sentinel(group) && asset.group.as_deref() != Some(group.as_str()) {
                    return false;
                }
            }
            if let Some(seller) = &filter.seller {
                if !is_sentinel(seller) && asset.seller != *seller {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    match filter.sort {
        SortKey::Default => {}
        SortKey::PriceAsc => filtered.sort_by_key(|a| a.price_lamports),
        SortKey::PriceDesc => {
            filtered.sort_by_key(|a| std::cmp::Reverse(a.price_lamports))
        }
        SortKey::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, price_sol: f64, group: Option<&str>, seller: &str) -> NftDetail {
        NftDetail {
            mint: format!("mint-{}", name),
            name: name.to_string(),
            symbol: "ATL".to_string(),
            uri: format!("https://example.com/{}.json", name),
            group: group.map(|g| g.to_string()),
            seller: seller.to_string(),
            price_lamports: (price_sol * LAMPORTS_PER_SOL as f64) as u64,
            listing: format!("listing-{}", name),
        }
    }

    /// Three assets at 0.5, 2.0, and 1.0 SOL, in that arrival order.
    fn sample_assets() -> Vec<NftDetail> {
        vec![
            asset("Beanie", 0.5, Some("winter"), "alice"),
            asset("Parka", 2.0, Some("winter"), "bob"),
            asset("Scarf", 1.0, Some("autumn"), "alice"),
        ]
    }

    #[test]
    fn test_no_filter_preserves_arrival_order() {
        let assets = sample_assets();
        let out = apply_filters(&assets, &MarketFilter::default());

        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Parka", "Scarf"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let assets = sample_assets();
        let filter = MarketFilter {
            search: Some("PAR".to_string()),
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Parka");
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let assets = sample_assets();
        let filter = MarketFilter {
            search: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(apply_filters(&assets, &filter).len(), 3);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let assets = sample_assets();
        let filter = MarketFilter {
            min_price: Some(0.5),
            max_price: Some(1.0),
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Scarf"]);
    }

    #[test]
    fn test_min_price_alone() {
        let assets = sample_assets();
        let filter = MarketFilter {
            min_price: Some(1.0),
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Parka", "Scarf"]);
    }

    #[test]
    fn test_group_exact_match_and_sentinel() {
        let assets = sample_assets();

        let filter = MarketFilter {
            group: Some("winter".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&assets, &filter).len(), 2);

        let sentinel = MarketFilter {
            group: Some("all_groups".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&assets, &sentinel).len(), 3);
    }

    #[test]
    fn test_seller_exact_match() {
        let assets = sample_assets();
        let filter = MarketFilter {
            seller: Some("alice".to_string()),
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Scarf"]);
    }

    #[test]
    fn test_sort_price_asc() {
        let assets = sample_assets();
        let filter = MarketFilter {
            sort: SortKey::PriceAsc,
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Scarf", "Parka"]);
    }

    #[test]
    fn test_sort_price_desc() {
        let assets = sample_assets();
        let filter = MarketFilter {
            sort: SortKey::PriceDesc,
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Parka", "Scarf", "Beanie"]);
    }

    #[test]
    fn test_sort_by_name() {
        let assets = sample_assets();
        let filter = MarketFilter {
            sort: SortKey::Name,
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Parka", "Scarf"]);
    }

    #[test]
    fn test_stable_sort_keeps_arrival_order_on_ties() {
        let assets = vec![
            asset("First", 1.0, None, "alice"),
            asset("Second", 1.0, None, "bob"),
            asset("Third", 1.0, None, "carol"),
        ];
        let filter = MarketFilter {
            sort: SortKey::PriceAsc,
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let assets = sample_assets();
        let filter = MarketFilter {
            sort: SortKey::PriceDesc,
            min_price: Some(1.0),
            ..Default::default()
        };

        let _ = apply_filters(&assets, &filter);

        // Re-running without filters returns the original view
        let again = apply_filters(&assets, &MarketFilter::default());
        let names: Vec<&str> = again.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Parka", "Scarf"]);
    }

    #[test]
    fn test_combined_filters() {
        let assets = sample_assets();
        let filter = MarketFilter {
            seller: Some("alice".to_string()),
            max_price: Some(0.75),
            ..Default::default()
        };

        let out = apply_filters(&assets, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Beanie");
    }

    #[test]
    fn test_sort_key_deserializes_kebab_case() {
        let key: SortKey = serde_json::from_str("\"price-asc\"").unwrap();
        assert_eq!(key, SortKey::PriceAsc);

        let key: SortKey = serde_json::from_str("\"price-desc\"").unwrap();
        assert_eq!(key, SortKey::PriceDesc);

        let key: SortKey = serde_json::from_str("\"name\"").unwrap();
        assert_eq!(key, SortKey::Name);
    }
}
