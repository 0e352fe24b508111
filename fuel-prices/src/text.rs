//! Text normalization for Spanish place names.
//!
//! The listing API is inconsistent about accents, capitalization and where it
//! puts the definite article (`"Rosario (El)"` vs `"El Rosario"`). Everything
//! that compares names goes through [`match_key`].

use serde_json::Value;

/// Trailing article markers and the leading form they are rewritten to.
///
/// Matched after title casing, so `(LA)` and `(la)` are covered by `(La)`.
/// The elided Catalan article attaches to the name without a space.
const ARTICLES: &[(&str, &str)] = &[
    (" (La)", "La "),
    (" (El)", "El "),
    (" (Los)", "Los "),
    (" (Las)", "Las "),
    (" (A)", "A "),
    (" (O)", "O "),
    (" (As)", "As "),
    (" (Os)", "Os "),
    (" (Els)", "Els "),
    (" (Les)", "Les "),
    (" (Es)", "Es "),
    (" (L')", "L'"),
];

/// Replace accented letters by their base Latin letter and fold to lower case.
///
/// Whitespace is left alone.
///
/// ```
/// use fuel_prices::text::normalize;
///
/// assert_eq!(normalize("España"), "espana");
/// assert_eq!(normalize("Sant Adrià de Besòs"), "sant adria de besos");
/// ```
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().map(strip_accent).collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' => 'a',
        'é' | 'è' => 'e',
        'í' | 'ï' => 'i',
        'ó' | 'ò' => 'o',
        'ú' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Title-case a name and move a trailing article to the front.
///
/// ```
/// use fuel_prices::text::canonicalize_article;
///
/// assert_eq!(canonicalize_article("Rosario (El)"), "El Rosario");
/// assert_eq!(canonicalize_article("PALMAS (LAS)"), "Las Palmas");
/// assert_eq!(canonicalize_article("Madrid"), "Madrid");
/// ```
pub fn canonicalize_article(name: &str) -> String {
    let titled = title_case(name);
    let mut base = titled.as_str();
    let mut leading = String::new();

    'strip: loop {
        for (suffix, prefix) in ARTICLES {
            if let Some(rest) = base.strip_suffix(suffix) {
                leading.insert_str(0, prefix);
                base = rest.trim_end();
                continue 'strip;
            }
        }
        break;
    }

    if leading.is_empty() {
        return titled;
    }
    format!("{leading}{base}").trim_end().to_owned()
}

/// [`canonicalize_article`] lifted to JSON values.
///
/// Only strings are rewritten. Numbers in particular pass through untouched,
/// so codes stay codes.
pub fn canonicalize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(canonicalize_article(s)),
        other => other.clone(),
    }
}

/// The comparison form of a name: trimmed, normalized, canonicalized, then
/// normalized again so the article rewrite also sees unaccented markers.
pub fn match_key(text: &str) -> String {
    normalize(&canonicalize_article(&normalize(text.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_strips_accents() {
        assert_eq!(normalize("España"), "espana");
        assert_eq!(normalize("Cádiz"), "cadiz");
        assert_eq!(normalize("Pingüino"), "pinguino");
        assert_eq!(normalize("Almacelles Ç"), "almacelles c");
        assert_eq!(normalize("ÁVILA"), "avila");
    }

    #[test]
    fn normalize_keeps_whitespace() {
        assert_eq!(normalize("  Los  Ángeles "), "  los  angeles ");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("CASTILLA Y LEÓN"), "Castilla Y León");
        assert_eq!(title_case("l'hospitalet"), "L'Hospitalet");
        assert_eq!(title_case("san sebastián de los reyes"), "San Sebastián De Los Reyes");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn article_moves_to_front() {
        assert_eq!(canonicalize_article("Rosario (El)"), "El Rosario");
        assert_eq!(canonicalize_article("Rosario (EL)"), "El Rosario");
        assert_eq!(
            canonicalize_article("palmas de gran canaria (las)"),
            "Las Palmas De Gran Canaria"
        );
        assert_eq!(canonicalize_article("Coruña (A)"), "A Coruña");
        assert_eq!(canonicalize_article("Rozas de Madrid (Las)"), "Las Rozas De Madrid");
    }

    #[test]
    fn stacked_articles_are_all_moved() {
        assert_eq!(canonicalize_article("Rosario (La) (El)"), "La El Rosario");
        assert_eq!(canonicalize_article("Rosario  (El)"), "El Rosario");
    }

    #[test]
    fn elided_article_has_no_space() {
        assert_eq!(
            canonicalize_article("Hospitalet de Llobregat (L')"),
            "L'Hospitalet De Llobregat"
        );
    }

    #[test]
    fn article_only_at_the_end() {
        assert_eq!(canonicalize_article("Villa (La) Nueva"), "Villa (La) Nueva");
        assert_eq!(canonicalize_article("El Rosario"), "El Rosario");
    }

    #[test]
    fn canonicalize_value_skips_non_strings() {
        assert_eq!(canonicalize_value(&json!(12)), json!(12));
        assert_eq!(canonicalize_value(&json!(1.5)), json!(1.5));
        assert_eq!(canonicalize_value(&json!(null)), json!(null));
        assert_eq!(canonicalize_value(&json!(["Rosario (El)"])), json!(["Rosario (El)"]));
        assert_eq!(canonicalize_value(&json!("Rosario (El)")), json!("El Rosario"));
    }

    #[test]
    fn match_key_equates_spellings() {
        let canonical = match_key("El Rosario");
        assert_eq!(match_key("Rosario (El)"), canonical);
        assert_eq!(match_key("  el rosario "), canonical);
        assert_eq!(match_key("EL ROSARIO"), canonical);
        assert_eq!(match_key("cadiz"), match_key("Cádiz"));
        assert_ne!(match_key("Cádiz"), match_key("Cádiz Norte"));
    }
}
