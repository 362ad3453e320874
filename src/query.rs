use crate::tokenizer::Tokenizer;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref PRICE_MAX_RE: Regex =
        Regex::new(r"(?:under|below|less than)\s*\$?(\d+(?:\.\d+)?)").expect("valid regex");
    static ref PRICE_MIN_RE: Regex =
        Regex::new(r"(?:over|above|more than)\s*\$?(\d+(?:\.\d+)?)").expect("valid regex");
    static ref PRICE_RANGE_RE: Regex = Regex::new(
        r"(?:between|from)\s*\$?(\d+(?:\.\d+)?)\s*(?:and|to)\s*\$?(\d+(?:\.\d+)?)"
    )
    .expect("valid regex");
    static ref RATING_IMPLICIT_RE: Regex =
        Regex::new(r"good\s+reviews|4\s*\+|4\s*stars|rating\s*>=\s*4").expect("valid regex");
    static ref RATING_EXPLICIT_RE: Regex =
        Regex::new(r"(?:rating|stars)\s*>=?\s*(\d(?:\.\d)?)").expect("valid regex");
}

/// Surface token -> canonical category, scanned in definition order.
/// First synonym contained in the query wins.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("sneaker", "Shoes"),
    ("shoe", "Shoes"),
    ("boot", "Shoes"),
    ("sandal", "Shoes"),
    ("loafer", "Shoes"),
    ("watch", "Electronics"),
    ("phone", "Electronics"),
    ("laptop", "Electronics"),
    ("headphone", "Electronics"),
    ("earbud", "Electronics"),
    ("speaker", "Electronics"),
    ("camera", "Electronics"),
    ("shirt", "Clothing"),
    ("hoodie", "Clothing"),
    ("jacket", "Clothing"),
    ("jeans", "Clothing"),
    ("sock", "Clothing"),
    ("sweater", "Clothing"),
    ("dress", "Clothing"),
    ("backpack", "Accessories"),
    ("bag", "Accessories"),
    ("wallet", "Accessories"),
    ("belt", "Accessories"),
    ("scarf", "Accessories"),
    ("hat", "Accessories"),
];

/// Structured constraints and keywords extracted from one raw query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedQuery {
    pub keywords: Vec<String>,
    pub category: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rating_min: Option<f64>,
}

/// Rule-based extractor turning free text into a ParsedQuery
pub struct QueryExtractor {
    tokenizer: Tokenizer,
    synonyms: Vec<(String, String)>,
}

impl QueryExtractor {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(s, c)| (s.to_string(), c.to_string()))
                .collect(),
        }
    }

    /// Create an extractor with caller-supplied tables
    pub fn with_tables(tokenizer: Tokenizer, synonyms: Vec<(String, String)>) -> Self {
        Self { tokenizer, synonyms }
    }

    /// Extract structured constraints and keywords from a raw query.
    /// Rules are applied independently against the lowercased string;
    /// a missing match leaves the corresponding field unset.
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        let lowered = raw.to_lowercase();
        let mut parsed = ParsedQuery::default();

        if let Some(caps) = PRICE_MAX_RE.captures(&lowered) {
            parsed.price_max = caps[1].parse().ok();
        }
        if let Some(caps) = PRICE_MIN_RE.captures(&lowered) {
            parsed.price_min = caps[1].parse().ok();
        }
        // The range pattern runs last and overwrites both bounds
        if let Some(caps) = PRICE_RANGE_RE.captures(&lowered) {
            parsed.price_min = caps[1].parse().ok();
            parsed.price_max = caps[2].parse().ok();
        }

        if RATING_IMPLICIT_RE.is_match(&lowered) {
            parsed.rating_min = Some(4.0);
        }
        // An explicit numeric rating wins over the implicit phrases
        if let Some(caps) = RATING_EXPLICIT_RE.captures(&lowered) {
            parsed.rating_min = caps[1].parse().ok();
        }

        for (surface, category) in &self.synonyms {
            if lowered.contains(surface.as_str()) {
                parsed.category = Some(category.clone());
                break;
            }
        }

        parsed.keywords = self.tokenizer.keywords(raw);

        tracing::debug!(query = %raw, ?parsed, "parsed query");
        parsed
    }
}

impl Default for QueryExtractor {
    fn default() -> Self {
        Self::new()
    }
}
