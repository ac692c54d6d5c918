use regex_syntax::{hir::literal::Extractor, parse};

/// Extract literal prefix substrings from a rule pattern for use as
/// Aho-Corasick prefilter candidates. Returns an empty vec when the pattern
/// yields no usable literal set, meaning the rule must always be tried.
///
/// The set is all-or-nothing: prefiltering is only sound when every possible
/// match contains one of the returned literals, so a single literal under
/// `min_len` (like the bare "vr" device token) discards the whole set rather
/// than just itself. Patterns using lookaround (the engine-exclusion rules)
/// are not parseable by `regex_syntax` and also return empty; the
/// token-disjunction rules of the device/cpu cascades all yield useful
/// literals.
pub(crate) fn extract_literals(pattern: &str, min_len: usize) -> Vec<String> {
    let hir = match parse(pattern) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };

    let mut extractor = Extractor::new();
    extractor.kind(regex_syntax::hir::literal::ExtractKind::Prefix);

    let seq = extractor.extract(&hir);
    let literals = match seq.literals() {
        Some(lits) => lits,
        // Infinite sequence: no finite literal set covers the pattern.
        None => return Vec::new(),
    };

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        let s = match std::str::from_utf8(lit.as_bytes()) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        if s.len() < min_len {
            return Vec::new();
        }
        out.push(s.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_disjunction() {
        let lits = extract_literals("playstation|xbox|nintendo", 3);
        assert!(lits.contains(&"playstation".to_string()));
        assert!(lits.contains(&"xbox".to_string()));
        assert!(lits.contains(&"nintendo".to_string()));
    }

    #[test]
    fn one_short_token_discards_the_set() {
        let lits = extract_literals("vr|quest|oculus", 3);
        assert!(lits.is_empty());
    }

    #[test]
    fn lookaround_pattern_yields_nothing() {
        let lits = extract_literals(r"^(?=.*gecko)(?!.*like gecko)", 3);
        assert!(lits.is_empty());
    }
}
