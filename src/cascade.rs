use aho_corasick::AhoCorasick;
use rayon::prelude::*;

use crate::error::Result;
use crate::literal::extract_literals;

/// Minimum literal length worth prefiltering on; shorter tokens (like the
/// bare "vr" device marker) leave their rule always-checked.
const MIN_LITERAL_LEN: usize = 3;

/// Compile a rule pattern case-insensitively.
pub(crate) fn compile(pattern: &str) -> Result<fancy_regex::Regex> {
    Ok(fancy_regex::Regex::new(&format!("(?i){pattern}"))?)
}

struct Rule<T> {
    regex: fancy_regex::Regex,
    outcome: T,
}

/// An ordered precedence cascade: (pattern, outcome) pairs evaluated top to
/// bottom, first match wins. The precedence policy lives entirely in the
/// table order, so adding a token or a rule is a localized, order-aware edit.
///
/// An Aho-Corasick set over literals extracted from the patterns prunes
/// rules that cannot possibly match; rules whose pattern yields no literal
/// (lookaround-based exclusion rules) are always tried.
pub(crate) struct Cascade<T> {
    rules: Vec<Rule<T>>,
    prefilter: Option<AhoCorasick>,
    /// Maps prefilter pattern index → rule index.
    literal_owner: Vec<usize>,
    /// Rules checked regardless of prefilter hits.
    always: Vec<bool>,
}

impl<T> Cascade<T> {
    /// Build a cascade from ordered (pattern, outcome) pairs. Patterns are
    /// compiled case-insensitively, in parallel.
    pub fn build<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, T)>,
        T: Sync,
    {
        let items: Vec<(&'static str, T)> = items.into_iter().collect();

        let regexes: Vec<fancy_regex::Regex> = items
            .par_iter()
            .map(|(pattern, _)| compile(pattern))
            .collect::<Result<Vec<_>>>()?;

        let mut always = vec![false; items.len()];
        let mut literals: Vec<String> = Vec::new();
        let mut literal_owner: Vec<usize> = Vec::new();
        for (idx, (pattern, _)) in items.iter().enumerate() {
            let lits = extract_literals(pattern, MIN_LITERAL_LEN);
            if lits.is_empty() {
                always[idx] = true;
            } else {
                for lit in lits {
                    literals.push(lit);
                    literal_owner.push(idx);
                }
            }
        }

        let prefilter = if literals.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&literals)?,
            )
        };

        let rules = items
            .into_iter()
            .zip(regexes)
            .map(|((_, outcome), regex)| Rule { regex, outcome })
            .collect();

        Ok(Self {
            rules,
            prefilter,
            literal_owner,
            always,
        })
    }

    /// First matching rule's outcome, in table order.
    pub fn first_match(&self, haystack: &str) -> Option<&T> {
        self.first_match_where(haystack, |_| true)
    }

    /// Like [`first_match`](Self::first_match), but rules whose outcome
    /// fails `eligible` are skipped without consuming their precedence slot.
    pub fn first_match_where(
        &self,
        haystack: &str,
        mut eligible: impl FnMut(&T) -> bool,
    ) -> Option<&T> {
        let mut candidate = self.always.clone();
        match &self.prefilter {
            Some(pf) => {
                for m in pf.find_overlapping_iter(haystack) {
                    candidate[self.literal_owner[m.pattern().as_usize()]] = true;
                }
            }
            None => candidate.fill(true),
        }

        for (idx, rule) in self.rules.iter().enumerate() {
            if !candidate[idx] || !eligible(&rule.outcome) {
                continue;
            }
            // Treat a regex evaluation error (backtracking limit) as a
            // non-match; classification stays total.
            if rule.regex.is_match(haystack).unwrap_or(false) {
                return Some(&rule.outcome);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cascade<&'static str> {
        Cascade::build([
            ("playstation|xbox", "console"),
            ("tablet|kindle", "tablet"),
            ("iphone|android", "mobile"),
        ])
        .unwrap()
    }

    #[test]
    fn first_match_wins_in_table_order() {
        let c = sample();
        // "android tablet" matches rules 2 and 3; rule 2 is earlier.
        assert_eq!(c.first_match("Android Tablet Build"), Some(&"tablet"));
        assert_eq!(c.first_match("Xbox One"), Some(&"console"));
        assert_eq!(c.first_match("nothing here"), None);
    }

    #[test]
    fn ineligible_rules_fall_through() {
        let c = sample();
        let got = c.first_match_where("Android Tablet Build", |o| *o != "tablet");
        assert_eq!(got, Some(&"mobile"));
    }

    #[test]
    fn lookaround_rules_are_always_candidates() {
        let c = Cascade::build([
            (r"^(?=.*gecko)(?!.*like gecko)", "gecko"),
            ("webkit", "webkit"),
        ])
        .unwrap();
        assert_eq!(c.first_match("Gecko/20100101 Firefox/120.0"), Some(&"gecko"));
        assert_eq!(c.first_match("AppleWebKit/605.1.15 (KHTML, like Gecko)"), Some(&"webkit"));
    }

    #[test]
    fn empty_input_matches_nothing() {
        assert_eq!(sample().first_match(""), None);
    }
}
