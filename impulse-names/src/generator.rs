//! Session-scoped username generator.

use crate::style::{Pattern, Style};
use crate::weighted::select_weighted;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Attempts made to find an unused name before falling back to a numbered one.
pub const MAX_ATTEMPTS: usize = 50;

/// Numbers that may be appended to a name during variation, most likely first.
pub const LUCKY_NUMBERS: [u32; 11] = [7, 13, 21, 42, 69, 77, 99, 123, 256, 420, 777];

/// Exclusive upper bound for the number appended on the fallback path.
const FALLBACK_NUMBER_LIMIT: u32 = 999;

/// Draw thresholds for each cosmetic variant (a variant is added when a
/// uniform draw exceeds its threshold).
const RANDOM_CASE_THRESHOLD: f64 = 0.7;
const DECORATION_THRESHOLD: f64 = 0.8;
const LUCKY_NUMBER_THRESHOLD: f64 = 0.5;

/// Generates styled usernames and remembers which ones it has returned.
///
/// Uniqueness is tracked case-insensitively and only for the lifetime of the
/// generator; nothing is persisted.
#[derive(Debug)]
pub struct NameGenerator<R = ThreadRng> {
    rng: R,
    used: HashSet<String>,
}

impl NameGenerator<ThreadRng> {
    /// Creates a generator backed by the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for NameGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> NameGenerator<R> {
    /// Creates a generator backed by the given RNG.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            used: HashSet::new(),
        }
    }

    /// Generates a name for a style given by name. Unknown styles use
    /// [`Style::Modern`].
    pub fn generate(&mut self, style: &str) -> String {
        self.generate_style(Style::parse_or_default(style))
    }

    /// Generates a name for a built-in style.
    pub fn generate_style(&mut self, style: Style) -> String {
        self.generate_from(style.pattern())
    }

    /// Generates a name from arbitrary word lists.
    ///
    /// Returns an unused name when one turns up within [`MAX_ATTEMPTS`] tries
    /// and records it. Otherwise returns a fresh name with a number in
    /// `0..999` appended; that name is neither checked nor recorded.
    pub fn generate_from(&mut self, pattern: &Pattern) -> String {
        for _ in 0..MAX_ATTEMPTS {
            let name = self.compose(pattern);
            if self.used.insert(name.to_lowercase()) {
                return name;
            }
        }

        let base = self.compose(pattern);
        let number = self.rng.gen_range(0..FALLBACK_NUMBER_LIMIT);
        debug!(
            used = self.used.len(),
            "no unused name after {} attempts, numbering {}", MAX_ATTEMPTS, base
        );
        format!("{base}{number}")
    }

    /// Generates `count` names for one style in a row.
    pub fn generate_batch(&mut self, style: Style, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate_style(style)).collect()
    }

    /// Forgets every name handed out so far.
    pub fn clear(&mut self) {
        self.used.clear();
    }

    /// Number of distinct names recorded.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Returns true if `name` (in any casing) has already been handed out.
    #[must_use]
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&name.to_lowercase())
    }

    fn compose(&mut self, pattern: &Pattern) -> String {
        let prefix = self.pick(pattern.prefixes);
        let suffix = self.pick(pattern.suffixes);
        let connector = self.pick(pattern.connectors);

        self.vary(format!("{prefix}{connector}{suffix}"))
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        select_weighted(&mut self.rng, words)
            .copied()
            .unwrap_or_default()
    }

    /// Builds the cosmetic variants of `name` and picks one, favoring the
    /// earlier ones (the plain name is always first).
    fn vary(&mut self, name: String) -> String {
        let mut variants = vec![name.clone()];

        if self.rng.r#gen::<f64>() > RANDOM_CASE_THRESHOLD {
            let recased = self.random_case(&name);
            variants.push(recased);
        }

        if self.rng.r#gen::<f64>() > DECORATION_THRESHOLD {
            variants.push(format!("{name}_"));
            variants.push(format!("X{name}"));
        }

        if self.rng.r#gen::<f64>() > LUCKY_NUMBER_THRESHOLD {
            if let Some(lucky) = select_weighted(&mut self.rng, &LUCKY_NUMBERS[..]) {
                variants.push(format!("{name}{lucky}"));
            }
        }

        select_weighted(&mut self.rng, &variants)
            .cloned()
            .unwrap_or(name)
    }

    fn random_case(&mut self, name: &str) -> String {
        name.chars()
            .map(|c| {
                if self.rng.gen_bool(0.5) {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SINGLE: Pattern = Pattern::new(&["Ab"], &["Cd"], &[""]);

    /// Every way to read the digits after a decorated "AbCd" as an optional
    /// lucky number followed by the fallback number.
    fn fallback_numbers(name: &str) -> Vec<u32> {
        let lower = name.to_lowercase();
        let rest = lower.strip_prefix('x').unwrap_or(&lower);
        let Some(rest) = rest.strip_prefix("abcd") else {
            return Vec::new();
        };
        let rest = rest.strip_prefix('_').unwrap_or(rest);

        let lucky = LUCKY_NUMBERS.iter().map(u32::to_string);
        std::iter::once(rest)
            .chain(lucky.filter_map(|n| rest.strip_prefix(n.as_str())))
            .filter(|digits| *digits == "0" || !digits.starts_with('0'))
            .filter_map(|digits| digits.parse().ok())
            .collect()
    }

    #[test]
    fn variants_keep_the_base_letters() {
        let mut generator = NameGenerator::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let name = generator.vary("AbCd".to_string());
            let lower = name.to_lowercase();
            let trimmed = lower.trim_end_matches(|c: char| c.is_ascii_digit());
            let trimmed = trimmed.trim_end_matches('_');
            let trimmed = trimmed.strip_prefix('x').unwrap_or(trimmed);
            assert_eq!(trimmed, "abcd", "unexpected variant {name}");
        }
    }

    #[test]
    fn random_case_preserves_letters() {
        let mut generator = NameGenerator::with_rng(StdRng::seed_from_u64(3));
        let recased = generator.random_case("ShadowReaper");
        assert!(recased.eq_ignore_ascii_case("ShadowReaper"));
    }

    #[test]
    fn fallback_is_not_recorded() {
        let mut generator = NameGenerator::with_rng(StdRng::seed_from_u64(11));
        for _ in 0..200 {
            generator.generate_from(&SINGLE);
        }
        let before = generator.used_count();
        let fallback = generator.generate_from(&SINGLE);
        assert_eq!(generator.used_count(), before);
        assert!(fallback.ends_with(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn fallback_number_stays_below_limit() {
        let mut generator = NameGenerator::with_rng(StdRng::seed_from_u64(29));
        for _ in 0..200 {
            generator.generate_from(&SINGLE);
        }

        let mut largest = 0;
        for _ in 0..500 {
            let before = generator.used_count();
            let name = generator.generate_from(&SINGLE);
            if generator.used_count() != before {
                continue;
            }
            let numbers = fallback_numbers(&name);
            assert!(
                numbers.iter().any(|&n| n < FALLBACK_NUMBER_LIMIT),
                "fallback {name} has no number below {FALLBACK_NUMBER_LIMIT}"
            );
            if let Some(&n) = numbers.iter().filter(|&&n| n < FALLBACK_NUMBER_LIMIT).max() {
                largest = largest.max(n);
            }
        }
        // 500 draws from 0..999 reach the top tenth with near certainty.
        assert!(largest >= 900, "largest fallback number {largest}");
    }
}
