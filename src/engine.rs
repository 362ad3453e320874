use crate::document::{Document, Product, ScoredItem};
use crate::fuzzy::fuzzy_includes;
use crate::index::TfIdfModel;
use crate::query::{ParsedQuery, QueryExtractor};
use crate::ranking;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

/// Scores below this carry no usable semantic signal, typically a typo or
/// an out-of-vocabulary query; the fuzzy fallback takes over.
pub const FALLBACK_THRESHOLD: f64 = 0.001;

/// Sentinel for the manual category filter meaning "no filter"
pub const ALL_CATEGORIES: &str = "All";

const FALLBACK_BONUS: f64 = 0.25;
const FALLBACK_CATEGORY_BONUS: f64 = 0.4;
const NOMINAL_SCORE: f64 = 0.12;
const MAX_FALLBACK_KEYWORDS: usize = 5;

/// Requested result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    Relevance,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Relevance
    }
}

/// Manual filter state supplied by the caller, independent of query parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filters {
    pub category: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rating_min: Option<f64>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            price_min: None,
            price_max: None,
            rating_min: None,
        }
    }
}

/// Search options
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub filters: Filters,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

/// Search result: the ranked items plus the parsed constraints, so the
/// caller can reflect extracted bounds back into its own filter state
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub items: Vec<ScoredItem>,
    pub parsed: ParsedQuery,
}

/// Main search engine: query understanding, TF-IDF scoring, fuzzy fallback
pub struct SearchEngine {
    tokenizer: Tokenizer,
    extractor: QueryExtractor,
    model: TfIdfModel,
    catalog: Vec<Product>,
}

impl SearchEngine {
    /// Build an engine over a catalog snapshot with default tables
    pub fn new(catalog: Vec<Product>) -> Self {
        Self::with_components(catalog, Tokenizer::new(), QueryExtractor::new())
    }

    /// Build an engine with caller-supplied tokenizer and extractor
    pub fn with_components(
        catalog: Vec<Product>,
        tokenizer: Tokenizer,
        extractor: QueryExtractor,
    ) -> Self {
        let documents: Vec<Document> = catalog.iter().map(Product::document).collect();
        let model = TfIdfModel::build(&documents, &tokenizer);
        Self {
            tokenizer,
            extractor,
            model,
            catalog,
        }
    }

    /// Replace the catalog snapshot and build a fresh model
    pub fn rebuild(&mut self, catalog: Vec<Product>) {
        let documents: Vec<Document> = catalog.iter().map(Product::document).collect();
        self.model = TfIdfModel::build(&documents, &self.tokenizer);
        self.catalog = catalog;
    }

    /// Expose the extractor so callers can parse without searching
    pub fn parse(&self, raw_query: &str) -> ParsedQuery {
        self.extractor.parse(raw_query)
    }

    pub fn model(&self) -> &TfIdfModel {
        &self.model
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Run the full ranking pipeline for one query
    pub fn search(&self, raw_query: &str, options: &SearchOptions) -> SearchResult {
        let parsed = self.extractor.parse(raw_query);
        let query_vec = ranking::vectorize(raw_query, &self.model, &self.tokenizer);

        let base: Vec<&Product> = self
            .catalog
            .iter()
            .filter(|product| Self::passes_manual(product, &options.filters))
            .collect();
        let candidates: Vec<&Product> = base
            .into_iter()
            .filter(|product| Self::passes_parsed(product, &parsed))
            .collect();

        let mut scored =
            ranking::score_candidates(&candidates, &query_vec, parsed.category.as_deref(), &self.model);

        let no_signal = !scored.is_empty() && scored.iter().all(|s| s.score < FALLBACK_THRESHOLD);
        if no_signal {
            tracing::debug!(candidates = scored.len(), "no semantic signal, trying fuzzy fallback");
            let rescued = self.fuzzy_rescue(&scored, &parsed);
            scored = if rescued.is_empty() {
                // no fuzzy survivors: return the filtered set at a flat nominal score
                scored
                    .into_iter()
                    .map(|mut item| {
                        item.score = NOMINAL_SCORE;
                        item
                    })
                    .collect()
            } else {
                rescued
            };
        }

        sort_items(&mut scored, options.sort);
        if let Some(limit) = options.limit {
            scored.truncate(limit);
        }

        SearchResult {
            items: scored,
            parsed,
        }
    }

    /// Keep only candidates whose text fuzzily contains every keyword
    /// (first few keywords only, to bound cost)
    fn fuzzy_rescue(&self, scored: &[ScoredItem], parsed: &ParsedQuery) -> Vec<ScoredItem> {
        let keywords: Vec<&String> = parsed
            .keywords
            .iter()
            .take(MAX_FALLBACK_KEYWORDS)
            .collect();
        if keywords.is_empty() {
            return Vec::new();
        }

        scored
            .iter()
            .filter_map(|entry| {
                let tokens = self.tokenizer.analyze(&entry.item.document().text);
                let matches = keywords
                    .iter()
                    .all(|keyword| fuzzy_includes(&tokens, keyword));
                if !matches {
                    return None;
                }

                let category_matched = parsed.category.as_deref() == Some(entry.item.category.as_str());
                let bonus = FALLBACK_BONUS
                    + if category_matched {
                        FALLBACK_CATEGORY_BONUS
                    } else {
                        0.0
                    };
                Some(ScoredItem::new(entry.item.clone(), entry.score + bonus))
            })
            .collect()
    }

    fn passes_manual(product: &Product, filters: &Filters) -> bool {
        if filters.category != ALL_CATEGORIES && product.category != filters.category {
            return false;
        }
        if let Some(min) = filters.price_min {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = filters.price_max {
            if product.price > max {
                return false;
            }
        }
        if let Some(min) = filters.rating_min {
            if product.rating < min {
                return false;
            }
        }
        true
    }

    fn passes_parsed(product: &Product, parsed: &ParsedQuery) -> bool {
        if let Some(category) = &parsed.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(min) = parsed.price_min {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = parsed.price_max {
            if product.price > max {
                return false;
            }
        }
        if let Some(min) = parsed.rating_min {
            if product.rating < min {
                return false;
            }
        }
        true
    }
}

fn sort_items(items: &mut [ScoredItem], sort: SortOrder) {
    match sort {
        SortOrder::Relevance => {
            items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
        }
        SortOrder::PriceAsc => items.sort_by(|a, b| {
            a.item
                .price
                .partial_cmp(&b.item.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortOrder::PriceDesc => items.sort_by(|a, b| {
            b.item
                .price
                .partial_cmp(&a.item.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortOrder::RatingDesc => items.sort_by(|a, b| {
            b.item
                .rating
                .partial_cmp(&a.item.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64, category: &str, rating: f64, desc: &str) -> Product {
        Product::new(
            id.to_string(),
            name.to_string(),
            price,
            category.to_string(),
            rating,
        )
        .with_description(desc.to_string())
    }

    fn test_catalog() -> Vec<Product> {
        vec![
            product(
                "p1",
                "Trail Running Shoes",
                89.99,
                "Shoes",
                4.6,
                "Lightweight running shoes with a grippy sole",
            ),
            product(
                "p2",
                "Canvas Sneakers",
                59.0,
                "Shoes",
                4.1,
                "Classic canvas sneakers",
            ),
            product(
                "p3",
                "Wireless Headphones",
                199.0,
                "Electronics",
                4.8,
                "Noise cancelling wireless headphones",
            ),
            product("p4", "Wool Socks", 9.99, "Clothing", 4.0, "Warm wool socks"),
        ]
    }

    #[test]
    fn test_relevance_ranking() {
        let engine = SearchEngine::new(test_catalog());
        let result = engine.search("running shoes", &SearchOptions::default());

        assert!(!result.items.is_empty());
        assert_eq!(result.items[0].item.id, "p1");
        assert_eq!(result.parsed.category.as_deref(), Some("Shoes"));
    }

    #[test]
    fn test_parsed_price_filter() {
        let engine = SearchEngine::new(test_catalog());
        let result = engine.search("shoes under $70", &SearchOptions::default());

        assert!(result.items.iter().all(|s| s.item.price <= 70.0));
        assert!(result.items.iter().any(|s| s.item.id == "p2"));
    }

    #[test]
    fn test_manual_filters_compose_with_parsed() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            filters: Filters {
                rating_min: Some(4.5),
                ..Filters::default()
            },
            ..SearchOptions::default()
        };
        let result = engine.search("shoes", &options);

        // manual rating floor keeps p1 only; p2 is filtered before scoring
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item.id, "p1");
    }

    #[test]
    fn test_manual_category_filter() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            filters: Filters {
                category: "Electronics".to_string(),
                ..Filters::default()
            },
            ..SearchOptions::default()
        };
        let result = engine.search("wireless", &options);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item.id, "p3");
    }

    #[test]
    fn test_fallback_on_typo() {
        let engine = SearchEngine::new(test_catalog());
        let result = engine.search("sneakr", &SearchOptions::default());

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item.id, "p2");
        assert!(result.items[0].score >= FALLBACK_BONUS);
    }

    #[test]
    fn test_fallback_degrades_to_nominal_score() {
        let engine = SearchEngine::new(test_catalog());
        let result = engine.search("zzyqx qwxzy", &SearchOptions::default());

        // nothing matches even fuzzily: the whole filtered set comes back flat
        assert_eq!(result.items.len(), 4);
        assert!(result.items.iter().all(|s| (s.score - NOMINAL_SCORE).abs() < 1e-9));
    }

    #[test]
    fn test_empty_query_returns_catalog_at_nominal_score() {
        let engine = SearchEngine::new(test_catalog());
        let result = engine.search("", &SearchOptions::default());

        assert_eq!(result.items.len(), 4);
        assert!(result.items.iter().all(|s| (s.score - NOMINAL_SCORE).abs() < 1e-9));
        assert!(result.parsed.keywords.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let engine = SearchEngine::new(Vec::new());
        let result = engine.search("anything at all", &SearchOptions::default());
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_sort_price_ascending() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            sort: SortOrder::PriceAsc,
            ..SearchOptions::default()
        };
        let result = engine.search("", &options);

        let prices: Vec<f64> = result.items.iter().map(|s| s.item.price).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_rating_descending() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            sort: SortOrder::RatingDesc,
            ..SearchOptions::default()
        };
        let result = engine.search("", &options);

        let ratings: Vec<f64> = result.items.iter().map(|s| s.item.rating).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_inverted_price_bounds_yield_nothing() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            filters: Filters {
                price_min: Some(100.0),
                price_max: Some(50.0),
                ..Filters::default()
            },
            ..SearchOptions::default()
        };
        let result = engine.search("shoes", &options);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_limit_truncates_after_sort() {
        let engine = SearchEngine::new(test_catalog());
        let options = SearchOptions {
            sort: SortOrder::PriceAsc,
            limit: Some(2),
            ..SearchOptions::default()
        };
        let result = engine.search("", &options);

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].item.id, "p4");
    }

    #[test]
    fn test_rebuild_swaps_catalog() {
        let mut engine = SearchEngine::new(test_catalog());
        engine.rebuild(vec![product(
            "n1",
            "Leather Wallet",
            35.0,
            "Accessories",
            4.3,
            "Slim leather wallet",
        )]);

        let result = engine.search("wallet", &SearchOptions::default());
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item.id, "n1");
        assert_eq!(engine.catalog().len(), 1);
    }
}
