//! # Name Casing
//!
//! The registry publishes names in upper case. Published records use
//! English title case, with a short allow-list of region acronyms kept
//! verbatim.
//!
//! ## Title-Case Rules
//!
//! The input is lower-cased, then split into tokens on whitespace, `:`,
//! `-` and en/em dashes (separators are kept as single-character tokens).
//! A token has its first alphanumeric character upper-cased unless:
//!
//! - it looks manually cased (an inner capital, or a dot followed by
//!   another character, as in `(pob.)`),
//! - it is a small word (`of`, `the`, `and`, ...) and neither the first nor
//!   the last token,
//! - it is immediately followed by a `:` that is not followed by whitespace.

use std::sync::OnceLock;

use regex::Regex;

/// Names that must be published exactly as the registry spells them.
pub const PRESERVED_ACRONYMS: &[&str] = &[
    "CALABARZON",
    "MIMAROPA",
    "SOCCSKSARGEN",
    "ARMM",
    "BARMM",
    "NCR",
    "CAR",
    "MIMAROPA Region",
];

/// Whether `name` is on the acronym allow-list.
pub fn is_preserved_acronym(name: &str) -> bool {
    PRESERVED_ACRONYMS.contains(&name)
}

fn small_words() -> &'static Regex {
    static SMALL_WORDS: OnceLock<Regex> = OnceLock::new();
    SMALL_WORDS.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:an?d?|a[st]|because|but|by|en|for|i[fn]|neither|nor|o[fnr]|only|over|per|so|some|tha[tn]|the|to|up|upon|vs?\.?|versus|via|when|with|without|yet)\b",
        )
        .expect("small-word pattern is valid")
    })
}

fn tokens() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| Regex::new(r"[^\s:\u{2013}\u{2014}-]+|.").expect("token pattern is valid"))
}

fn is_manual_case(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    (1..chars.len()).any(|i| {
        chars[i].is_ascii_uppercase() || (chars[i] == '.' && i + 1 < chars.len())
    })
}

fn capitalize_first_alphanumeric(token: &str) -> String {
    let is_target = |c: char| c.is_ascii_alphanumeric() || ('\u{C0}'..='\u{FF}').contains(&c);
    match token.char_indices().find(|&(_, c)| is_target(c)) {
        Some((at, c)) => {
            let mut out = String::with_capacity(token.len() + 1);
            out.push_str(&token[..at]);
            out.extend(c.to_uppercase());
            out.push_str(&token[at + c.len_utf8()..]);
            out
        }
        None => token.to_string(),
    }
}

/// Title-case a registry name.
///
/// ```
/// use psgc_core::title_case;
///
/// assert_eq!(title_case("CITY OF LAOAG"), "City of Laoag");
/// assert_eq!(title_case("STO. NIÑO"), "Sto. Niño");
/// ```
pub fn title_case(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    for m in tokens().find_iter(&lowered) {
        let token = m.as_str();
        let (start, end) = (m.start(), m.end());
        let is_edge = start == 0 || end == lowered.len();

        let mut rest = lowered[end..].chars();
        let colon_bound = match rest.next() {
            Some(':') => !rest.next().map_or(false, char::is_whitespace),
            _ => false,
        };

        if !is_manual_case(token)
            && (!small_words().is_match(token) || is_edge)
            && !colon_bound
        {
            out.push_str(&capitalize_first_alphanumeric(token));
        } else {
            out.push_str(token);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_plain_names() {
        assert_eq!(title_case("ILOCOS NORTE"), "Ilocos Norte");
        assert_eq!(title_case("QUEZON CITY"), "Quezon City");
        assert_eq!(title_case("DAVAO DEL SUR"), "Davao Del Sur");
    }

    #[test]
    fn small_words_stay_lower_inside() {
        assert_eq!(title_case("CITY OF MANILA"), "City of Manila");
        assert_eq!(title_case("ISLAND GARDEN CITY OF SAMAL"), "Island Garden City of Samal");
        assert_eq!(title_case("OF"), "Of");
        assert_eq!(title_case("CITY OF"), "City Of");
    }

    #[test]
    fn hyphen_splits_tokens() {
        assert_eq!(title_case("LAPU-LAPU CITY"), "Lapu-Lapu City");
    }

    #[test]
    fn dotted_tokens_are_left_alone() {
        assert_eq!(title_case("STO. NIÑO"), "Sto. Niño");
        assert_eq!(title_case("POBLACION (POB.)"), "Poblacion (pob.)");
    }

    #[test]
    fn leading_punctuation_is_skipped() {
        assert_eq!(title_case("BOAC (MAIN)"), "Boac (Main)");
    }

    #[test]
    fn roman_numeral_suffix_is_lowered() {
        // The reason the Tondo correction exists.
        assert_eq!(title_case("TONDO I/II"), "Tondo I/ii");
    }

    #[test]
    fn latin_one_letters_capitalize() {
        assert_eq!(title_case("ÑAGA"), "Ñaga");
    }

    #[test]
    fn acronym_allow_list() {
        assert!(is_preserved_acronym("CALABARZON"));
        assert!(is_preserved_acronym("MIMAROPA Region"));
        assert!(!is_preserved_acronym("Calabarzon"));
        assert!(!is_preserved_acronym("REGION I"));
    }
}
