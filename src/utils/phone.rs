/// Dedup key for phone numbers: formatting punctuation and whitespace
/// stripped, everything else kept as-is. "(555) 010-0" and "5550100" reduce
/// to the same key.
pub fn normalize_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '(' | ')' | '-') && !c.is_whitespace())
        .collect()
}

pub fn numbers_match(a: &str, b: &str) -> bool {
    let key = normalize_number(a);
    !key.is_empty() && key == normalize_number(b)
}
