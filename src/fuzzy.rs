/// Edit-distance budget scaled by keyword length
fn distance_threshold(keyword: &str) -> usize {
    if keyword.chars().count() <= 4 {
        1
    } else {
        2
    }
}

/// Edit-distance-tolerant keyword containment over a token sequence.
///
/// Substring containment in either direction is tried first; only then is
/// the Levenshtein budget spent.
pub fn fuzzy_includes(haystack_tokens: &[String], keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let threshold = distance_threshold(&keyword);

    haystack_tokens.iter().any(|token| {
        let token = token.to_lowercase();
        token.contains(&keyword)
            || keyword.contains(&token)
            || levenshtein(&token, &keyword) <= threshold
    })
}

/// Classic dynamic-programming Levenshtein distance.
/// Insertion, deletion, and substitution each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
