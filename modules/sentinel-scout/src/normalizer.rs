//! Headline refinement.
//!
//! Turns a raw feed headline into a short upper-case sentence naming an
//! actor and the node, or rejects it. Rejection is the common case and is
//! reported as `None`.

use std::sync::{Arc, LazyLock};

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;

use sentinel_common::IntelTables;

/// Accepted sentences never exceed this many words.
pub const MAX_WORDS: usize = 16;

/// Verbs that may follow a leading country name as an attribution clause.
const ATTRIBUTION_VERBS: &[&str] = &["SAYS", "CLAIMS", "WARNS", "REPORTS", "ITS"];

/// " - Reuters", " | AP" and everything after.
static SOURCE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[-|\x{2014}\x{2013}]\s+.*$").expect("Invalid source suffix regex")
});

/// ", OFFICIALS SAY..." style trailing attributions.
static ATTRIBUTION_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[;,\x{2014}-]\s*[A-Z\s]{2,25} (SAYS|CLAIMS|WARNS|REPORTS|INVESTIGATING|REGRETS).*$",
    )
    .expect("Invalid attribution suffix regex")
});

static LEADING_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^['"]*(AND|AS|BUT|SO|HOW|WHY|WHAT|WHEN|WATCH|BREAKING|REPORT|SITREP)[\s:]+"#,
    )
    .expect("Invalid leading filler regex")
});

static TRAILING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\x{2014},:|]\s*$").expect("Invalid trailing punctuation regex"));

/// Rule-based headline normalizer backed by a set of lookup tables.
#[derive(Debug, Clone)]
pub struct HeadlineNormalizer {
    tables: Arc<IntelTables>,
}

impl HeadlineNormalizer {
    pub fn new(tables: Arc<IntelTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &IntelTables {
        &self.tables
    }

    /// Refine `raw` for the given node. Returns `None` when the headline is
    /// too long or not relevant to the node.
    pub fn normalize<R: Rng + ?Sized>(
        &self,
        raw: &str,
        city: &str,
        country: &str,
        adjective: &str,
        rng: &mut R,
    ) -> Option<String> {
        let city_u = city.to_uppercase();
        let country_u = country.to_uppercase();
        let text = raw.to_uppercase();

        // Source attributions and filler
        let text = SOURCE_SUFFIX_RE.replace_all(&text, "");
        let text = ATTRIBUTION_SUFFIX_RE.replace_all(&text, "");
        let text = LEADING_FILLER_RE.replace(&text, "").into_owned();

        if let Some(dossier) = self.tables.dossier(&city_u) {
            let is_strike = self
                .tables
                .strike_keywords
                .iter()
                .any(|k| text.contains(k.as_str()));
            if is_strike {
                if let Some(line) = dossier.choose(rng) {
                    return Some(line.clone());
                }
            }
        }

        let actor = self.tables.resolve_actor(&city_u, adjective, &text);

        let text = strip_attribution_clause(&text, &country_u);
        let text = strip_name_prefix(text, &country_u);
        let text = strip_name_prefix(text, &city_u);

        let mut words = text.split_whitespace();
        let text = match words.next().and_then(|w| self.tables.verb_map.get(w)) {
            Some(verb) => {
                let rest: Vec<&str> = words.collect();
                format!("{actor} {verb} {}", rest.join(" "))
            }
            None => text.to_string(),
        };

        let text = text.replace(';', "").replace('-', " ");
        let mut text = TRAILING_PUNCT_RE.replace(&text, "").trim().to_string();

        if text.split_whitespace().count() > MAX_WORDS {
            return None;
        }
        if !text.is_empty() && !text.ends_with('.') {
            text.push('.');
        }

        let high_stakes = self
            .tables
            .high_stakes_keywords
            .iter()
            .any(|k| text.contains(k.as_str()));
        if !high_stakes || !text.contains(city_u.as_str()) {
            return None;
        }

        Some(text)
    }
}

/// Drop a leading "<COUNTRY> SAYS " (or CLAIMS/WARNS/REPORTS/ITS) clause.
fn strip_attribution_clause<'a>(text: &'a str, country: &str) -> &'a str {
    if country.is_empty() {
        return text;
    }
    let Some(rest) = text.strip_prefix(country).and_then(|r| r.strip_prefix(' ')) else {
        return text;
    };
    ATTRIBUTION_VERBS
        .iter()
        .find_map(|verb| rest.strip_prefix(verb).and_then(|r| r.strip_prefix(' ')))
        .unwrap_or(text)
}

/// Drop a leading "<NAME>:" or "<NAME> " prefix. The name must be followed by
/// at least one colon or whitespace character, so "ISRAELI" survives "ISRAEL".
fn strip_name_prefix<'a>(text: &'a str, name: &str) -> &'a str {
    if name.is_empty() {
        return text;
    }
    match text.strip_prefix(name) {
        Some(rest) if rest.starts_with(|c: char| c == ':' || c.is_whitespace()) => {
            rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace())
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn normalizer() -> HeadlineNormalizer {
        HeadlineNormalizer::new(Arc::new(IntelTables::standard()))
    }

    fn run(raw: &str, city: &str, country: &str, adjective: &str) -> Option<String> {
        let mut rng = StdRng::seed_from_u64(7);
        normalizer().normalize(raw, city, country, adjective, &mut rng)
    }

    #[test]
    fn test_verb_substitution_with_country_prefix() {
        let out = run(
            "North Korea launches missile toward border near Pyongyang - AP",
            "Pyongyang",
            "North Korea",
            "NORTH KOREAN",
        );
        assert_eq!(
            out.as_deref(),
            Some("NORTH KOREAN FORCES LAUNCH MISSILE TOWARD BORDER NEAR PYONGYANG.")
        );
    }

    #[test]
    fn test_country_attribution_clause_stripped() {
        let out = run(
            "Ukraine says its forces detain saboteurs in Kyiv",
            "Kyiv",
            "Ukraine",
            "UKRAINIAN",
        );
        assert_eq!(out.as_deref(), Some("ITS FORCES DETAIN SABOTEURS IN KYIV."));
    }

    #[test]
    fn test_trailing_spokesman_clause_stripped() {
        let out = run(
            "Sudanese army detains fighters near Khartoum, military spokesman says",
            "Khartoum",
            "Sudan",
            "SUDANESE",
        );
        assert_eq!(out.as_deref(), Some("SUDANESE ARMY DETAINS FIGHTERS NEAR KHARTOUM."));
    }

    #[test]
    fn test_leading_filler_and_quote_stripped() {
        let out = run(
            "'Watch: security forces raid protest camp in Tehran",
            "Tehran",
            "Iran",
            "IRANIAN",
        );
        assert_eq!(out.as_deref(), Some("SECURITY FORCES RAID PROTEST CAMP IN TEHRAN."));
    }

    #[test]
    fn test_trailing_pipe_removed() {
        let out = run("Security forces on alert in Tehran |", "Tehran", "Iran", "IRANIAN");
        assert_eq!(out.as_deref(), Some("SECURITY FORCES ON ALERT IN TEHRAN."));
    }

    #[test]
    fn test_em_dash_source_suffix_removed() {
        let out = run(
            "Security forces on alert in Tehran \u{2014} Opinion",
            "Tehran",
            "Iran",
            "IRANIAN",
        );
        assert_eq!(out.as_deref(), Some("SECURITY FORCES ON ALERT IN TEHRAN."));
    }

    #[test]
    fn test_pipe_source_suffix_removed() {
        let out = run("Security forces on alert in Tehran | Reuters", "Tehran", "Iran", "IRANIAN");
        assert_eq!(out.as_deref(), Some("SECURITY FORCES ON ALERT IN TEHRAN."));
    }

    #[test]
    fn test_semicolons_and_hyphens_cleaned() {
        let out = run(
            "Border units near Pyongyang on high-alert; drills continue",
            "Pyongyang",
            "North Korea",
            "NORTH KOREAN",
        );
        assert_eq!(
            out.as_deref(),
            Some("BORDER UNITS NEAR PYONGYANG ON HIGH ALERT DRILLS CONTINUE.")
        );
    }

    #[test]
    fn test_tactical_override_returns_dossier_line() {
        let tables = IntelTables::standard();
        let dossier = tables.dossier("GAZA CITY").unwrap().to_vec();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = normalizer()
                .normalize(
                    "Overnight strike reported somewhere",
                    "GAZA CITY",
                    "Palestinian Territories",
                    "PALESTINIAN",
                    &mut rng,
                )
                .unwrap();
            assert!(dossier.contains(&out), "{out} not in dossier");
        }
    }

    #[test]
    fn test_tactical_override_skips_relevance_gate() {
        // No city mention at all, still answered from the dossier.
        let out = run("Drone sighted", "Moscow", "Russia", "RUSSIAN").unwrap();
        assert!(out.contains("MOSCOW"));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_strike_keyword_without_dossier_goes_through_pipeline() {
        let out = run(
            "Pyongyang conducts drone strike drills",
            "Pyongyang",
            "North Korea",
            "NORTH KOREAN",
        );
        // City prefix is stripped, so the city no longer appears.
        assert_eq!(out, None);
    }

    #[test]
    fn test_russia_mention_overrides_city_actor() {
        let out = run(
            "Gaza City: conducts raids as Russia urges calm in Gaza City",
            "Gaza City",
            "Palestinian Territories",
            "PALESTINIAN",
        );
        assert_eq!(
            out.as_deref(),
            Some("RUSSIAN FORCES CONDUCT RAIDS AS RUSSIA URGES CALM IN GAZA CITY.")
        );
    }

    #[test]
    fn test_city_actor_used_without_russia() {
        let out = run(
            "Khartoum: eliminates militia cell near Khartoum airport",
            "Khartoum",
            "Sudan",
            "SUDANESE",
        );
        assert_eq!(
            out.as_deref(),
            Some("SUDANESE ARMED FORCES NEUTRALIZE MILITIA CELL NEAR KHARTOUM AIRPORT.")
        );
    }

    #[test]
    fn test_rejects_irrelevant_headline() {
        let out = run("BREAKING: SOMETHING IRRELEVANT HAPPENED", "Kyiv", "Ukraine", "UKRAINIAN");
        assert_eq!(out, None);
    }

    #[test]
    fn test_rejects_without_city_mention() {
        let out = run("Military parade draws crowds", "Pyongyang", "North Korea", "NORTH KOREAN");
        assert_eq!(out, None);
    }

    #[test]
    fn test_rejects_long_headlines() {
        let raw = "Military officials in Pyongyang hold a very long meeting about border \
                   security matters and many other things that keep going on";
        assert_eq!(run(raw, "Pyongyang", "North Korea", "NORTH KOREAN"), None);
    }

    #[test]
    fn test_accepted_output_invariants() {
        let tables = IntelTables::standard();
        let headlines = [
            "Pyongyang troops mass at border",
            "Border security tightened around Pyongyang - Reuters",
            "Military says nothing",
            "Why Pyongyang matters",
            "Pyongyang: war games continue near Pyongyang",
        ];
        for raw in headlines {
            if let Some(out) = run(raw, "Pyongyang", "North Korea", "NORTH KOREAN") {
                assert!(out.split_whitespace().count() <= MAX_WORDS);
                assert!(out.ends_with('.'));
                assert!(out.contains("PYONGYANG"));
                assert!(tables
                    .high_stakes_keywords
                    .iter()
                    .any(|k| out.contains(k.as_str())));
            }
        }
    }

    #[test]
    fn test_strip_name_prefix_requires_separator() {
        assert_eq!(strip_name_prefix("ISRAELI JETS", "ISRAEL"), "ISRAELI JETS");
        assert_eq!(strip_name_prefix("ISRAEL: JETS", "ISRAEL"), "JETS");
        assert_eq!(strip_name_prefix("ISRAEL  JETS", "ISRAEL"), "JETS");
    }

    #[test]
    fn test_strip_attribution_clause() {
        assert_eq!(strip_attribution_clause("IRAN WARNS OF WAR", "IRAN"), "OF WAR");
        assert_eq!(strip_attribution_clause("IRAN DENIES WAR", "IRAN"), "IRAN DENIES WAR");
    }
}
