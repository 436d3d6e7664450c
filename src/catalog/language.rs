//! Language selection over a model's ordered code list.
//!
//! Built once per catalog entry and immutable afterwards. Full tag matching is
//! the caller's concern; this only selects among the codes a model actually
//! ships, preferring the entry's default (first) code when nothing fits.

/// Immutable match structure over a model's language codes.
///
/// Codes keep the order they were given in: default language first, the rest
/// in store discovery order. Selection prefers an exact (case-insensitive)
/// match, then a shared primary subtag ("fr" matches "fr-CA"), then falls back
/// to the default.
#[derive(Debug, Clone)]
pub struct LanguageMatcher {
    codes: Vec<String>,
    normalized: Vec<String>,
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

impl LanguageMatcher {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        let normalized = codes.iter().map(|c| normalize(c)).collect();
        Self { codes, normalized }
    }

    /// The model's default language code, if any codes exist.
    pub fn default_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    /// Codes in match order (default first).
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Select the best supported code for an ordered preference list.
    ///
    /// Earlier preferences win over better match quality of later ones, the
    /// usual Accept-Language semantics. Returns the default code when no
    /// preference matches at all.
    pub fn matched(&self, preferred: &[&str]) -> Option<&str> {
        for want in preferred {
            let want = normalize(want);
            // exact match
            if let Some(i) = self.normalized.iter().position(|c| *c == want) {
                return Some(&self.codes[i]);
            }
            // shared primary subtag, either direction
            let want_primary = primary_subtag(&want).to_string();
            if let Some(i) = self
                .normalized
                .iter()
                .position(|c| primary_subtag(c) == want_primary)
            {
                return Some(&self.codes[i]);
            }
        }
        self.default_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_wins() {
        let m = LanguageMatcher::new(["fr", "en", "de"]);
        assert_eq!(m.matched(&["en"]), Some("en"));
        assert_eq!(m.matched(&["EN"]), Some("en"));
    }

    #[test]
    fn test_primary_subtag_match() {
        let m = LanguageMatcher::new(["fr-CA", "en"]);
        assert_eq!(m.matched(&["fr"]), Some("fr-CA"));
        assert_eq!(m.matched(&["fr-FR"]), Some("fr-CA"));
    }

    #[test]
    fn test_falls_back_to_default() {
        let m = LanguageMatcher::new(["fr", "en"]);
        assert_eq!(m.matched(&["ja"]), Some("fr"));
        assert_eq!(m.matched(&[]), Some("fr"));
    }

    #[test]
    fn test_preference_order_beats_list_order() {
        let m = LanguageMatcher::new(["fr", "en", "de"]);
        assert_eq!(m.matched(&["de", "fr"]), Some("de"));
    }

    #[test]
    fn test_empty_codes() {
        let m = LanguageMatcher::new(Vec::<String>::new());
        assert_eq!(m.matched(&["en"]), None);
        assert_eq!(m.default_code(), None);
    }
}
