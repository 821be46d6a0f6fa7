//! Homoglyph and confusable character handling for hostnames.
//!
//! A homograph attack builds a hostname from characters that render like
//! Latin letters but belong to a different script (e.g., Cyrillic 'а'
//! standing in for Latin 'a'). This module provides the two mechanisms the
//! URL gate is built on:
//!
//! - a static table of the Cyrillic and Greek letters that are visually
//!   indistinguishable from Latin letters, with the Latin letter each one
//!   imitates ([`confusable_to_latin`], [`latin_skeleton`]);
//! - a per-hostname script classification over decoded code points
//!   ([`classify_host`]), with an ASCII fast path.
//!
//! Classification reports facts; the accept/reject decision belongs to the
//! caller.

use unicode_script::{Script, UnicodeScript};

/// Confusable code points and the Latin letter each one imitates.
///
/// Sorted by code point so [`confusable_to_latin`] can binary-search it.
/// The table is deliberately narrow: only Cyrillic and Greek letters whose
/// glyphs are identical or near-identical to a Latin letter in common fonts.
pub const CONFUSABLE_PAIRS: &[(char, char)] = &[
    // Greek capitals
    ('Α', 'A'), // U+0391 GREEK CAPITAL LETTER ALPHA
    ('Ε', 'E'), // U+0395 GREEK CAPITAL LETTER EPSILON
    ('Η', 'H'), // U+0397 GREEK CAPITAL LETTER ETA
    ('Ι', 'I'), // U+0399 GREEK CAPITAL LETTER IOTA
    ('Κ', 'K'), // U+039A GREEK CAPITAL LETTER KAPPA
    ('Μ', 'M'), // U+039C GREEK CAPITAL LETTER MU
    ('Ο', 'O'), // U+039F GREEK CAPITAL LETTER OMICRON
    ('Ρ', 'P'), // U+03A1 GREEK CAPITAL LETTER RHO
    ('Τ', 'T'), // U+03A4 GREEK CAPITAL LETTER TAU
    ('Υ', 'Y'), // U+03A5 GREEK CAPITAL LETTER UPSILON
    ('Χ', 'X'), // U+03A7 GREEK CAPITAL LETTER CHI
    // Greek small letters
    ('α', 'a'), // U+03B1 GREEK SMALL LETTER ALPHA
    ('ι', 'i'), // U+03B9 GREEK SMALL LETTER IOTA
    ('κ', 'k'), // U+03BA GREEK SMALL LETTER KAPPA
    ('ο', 'o'), // U+03BF GREEK SMALL LETTER OMICRON
    ('ρ', 'p'), // U+03C1 GREEK SMALL LETTER RHO
    ('τ', 't'), // U+03C4 GREEK SMALL LETTER TAU
    ('υ', 'u'), // U+03C5 GREEK SMALL LETTER UPSILON
    ('χ', 'x'), // U+03C7 GREEK SMALL LETTER CHI
    // Cyrillic capitals
    ('І', 'I'), // U+0406 CYRILLIC CAPITAL LETTER BYELORUSSIAN-UKRAINIAN I
    ('А', 'A'), // U+0410 CYRILLIC CAPITAL LETTER A
    ('Е', 'E'), // U+0415 CYRILLIC CAPITAL LETTER IE
    ('К', 'K'), // U+041A CYRILLIC CAPITAL LETTER KA
    ('М', 'M'), // U+041C CYRILLIC CAPITAL LETTER EM
    ('Н', 'H'), // U+041D CYRILLIC CAPITAL LETTER EN
    ('О', 'O'), // U+041E CYRILLIC CAPITAL LETTER O
    ('Р', 'P'), // U+0420 CYRILLIC CAPITAL LETTER ER
    ('С', 'C'), // U+0421 CYRILLIC CAPITAL LETTER ES
    ('Т', 'T'), // U+0422 CYRILLIC CAPITAL LETTER TE
    ('У', 'Y'), // U+0423 CYRILLIC CAPITAL LETTER U
    ('Х', 'X'), // U+0425 CYRILLIC CAPITAL LETTER HA
    // Cyrillic small letters
    ('а', 'a'), // U+0430 CYRILLIC SMALL LETTER A
    ('е', 'e'), // U+0435 CYRILLIC SMALL LETTER IE
    ('к', 'k'), // U+043A CYRILLIC SMALL LETTER KA
    ('м', 'm'), // U+043C CYRILLIC SMALL LETTER EM
    ('о', 'o'), // U+043E CYRILLIC SMALL LETTER O
    ('р', 'p'), // U+0440 CYRILLIC SMALL LETTER ER
    ('с', 'c'), // U+0441 CYRILLIC SMALL LETTER ES
    ('т', 't'), // U+0442 CYRILLIC SMALL LETTER TE
    ('у', 'y'), // U+0443 CYRILLIC SMALL LETTER U
    ('х', 'x'), // U+0445 CYRILLIC SMALL LETTER HA
    ('і', 'i'), // U+0456 CYRILLIC SMALL LETTER BYELORUSSIAN-UKRAINIAN I
    ('һ', 'h'), // U+04BB CYRILLIC SMALL LETTER SHHA
];

/// Look up the Latin letter a confusable code point imitates.
///
/// Returns `None` for every character outside the table, including Latin
/// letters themselves.
#[must_use]
pub fn confusable_to_latin(c: char) -> Option<char> {
    CONFUSABLE_PAIRS
        .binary_search_by_key(&c, |&(confusable, _)| confusable)
        .ok()
        .map(|idx| CONFUSABLE_PAIRS[idx].1)
}

/// Replace every confusable code point with the Latin letter it imitates.
///
/// Characters outside the table pass through unchanged, so the skeleton of
/// `"pаypal.com"` (Cyrillic 'а') is `"paypal.com"` — the name the hostname
/// was crafted to resemble. Used for diagnostics only; never for matching.
#[must_use]
pub fn latin_skeleton(text: &str) -> String {
    text.chars()
        .map(|c| confusable_to_latin(c).unwrap_or(c))
        .collect()
}

/// Script classification of a hostname, derived by scanning code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostScript {
    /// Every code point is ASCII.
    Ascii,
    /// Contains non-ASCII code points, but no suspicious script mixing
    /// (e.g., a pure-Cyrillic or pure-Japanese IDN, or accented Latin).
    NonLatin,
    /// Latin letters mixed with a high-confusability script. The shape of
    /// a homograph attack.
    MixedScript,
}

/// Classify a hostname's scripts.
///
/// Mixing is only reported for Latin combined with Cyrillic, Greek,
/// Armenian, or Cherokee — the scripts that carry Latin lookalikes. Other
/// combinations (and pure non-Latin names) classify as
/// [`HostScript::NonLatin`]: legitimate IDN as far as scripts are
/// concerned, even when policy elsewhere refuses it.
///
/// The input must be the decoded Unicode form of the hostname; Punycode
/// `xn--` labels are ASCII and would classify as such.
///
/// # Examples
///
/// ```
/// use mdview_types::{HostScript, classify_host};
///
/// assert_eq!(classify_host("example.com"), HostScript::Ascii);
/// // Cyrillic 'а' (U+0430) among Latin letters
/// assert_eq!(classify_host("pаypal.com"), HostScript::MixedScript);
/// assert_eq!(classify_host("почта.рф"), HostScript::NonLatin);
/// ```
#[must_use]
pub fn classify_host(host: &str) -> HostScript {
    // Fast path: ASCII-only hostnames cannot mix scripts
    if host.is_ascii() {
        return HostScript::Ascii;
    }

    let mut has_latin = false;
    let mut has_confusable_script = false;

    for c in host.chars() {
        match c.script() {
            Script::Latin => has_latin = true,
            Script::Cyrillic | Script::Greek | Script::Armenian | Script::Cherokee => {
                has_confusable_script = true;
            }
            _ => {}
        }
    }

    if has_latin && has_confusable_script {
        HostScript::MixedScript
    } else {
        HostScript::NonLatin
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CONFUSABLE_PAIRS, HostScript, classify_host, confusable_to_latin, latin_skeleton,
    };

    #[test]
    fn table_is_sorted_for_binary_search() {
        for pair in CONFUSABLE_PAIRS.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "table out of order at {:?} / {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn table_covers_every_imitated_letter() {
        // Lowercase targets plus their uppercase forms, per the tables
        // published for Cyrillic/Greek homographs.
        let lowercase = "acehikmoptuxy";
        let uppercase = "ACEHIKMOPTXY";
        for target in lowercase.chars().chain(uppercase.chars()) {
            assert!(
                CONFUSABLE_PAIRS.iter().any(|&(_, latin)| latin == target),
                "no confusable maps to '{target}'"
            );
        }
    }

    #[test]
    fn looks_up_cyrillic_lowercase() {
        assert_eq!(confusable_to_latin('а'), Some('a')); // U+0430
        assert_eq!(confusable_to_latin('е'), Some('e')); // U+0435
        assert_eq!(confusable_to_latin('с'), Some('c')); // U+0441
        assert_eq!(confusable_to_latin('х'), Some('x')); // U+0445
    }

    #[test]
    fn looks_up_cyrillic_uppercase() {
        assert_eq!(confusable_to_latin('А'), Some('A')); // U+0410
        assert_eq!(confusable_to_latin('Н'), Some('H')); // U+041D
        assert_eq!(confusable_to_latin('У'), Some('Y')); // U+0423
    }

    #[test]
    fn looks_up_greek() {
        assert_eq!(confusable_to_latin('ο'), Some('o')); // U+03BF
        assert_eq!(confusable_to_latin('υ'), Some('u')); // U+03C5
        assert_eq!(confusable_to_latin('Ι'), Some('I')); // U+0399
        assert_eq!(confusable_to_latin('Υ'), Some('Y')); // U+03A5
    }

    #[test]
    fn latin_letters_are_not_confusables() {
        assert_eq!(confusable_to_latin('a'), None);
        assert_eq!(confusable_to_latin('O'), None);
    }

    #[test]
    fn distinct_non_latin_letters_are_not_confusables() {
        assert_eq!(confusable_to_latin('ж'), None); // U+0436, no Latin twin
        assert_eq!(confusable_to_latin('λ'), None); // U+03BB
        assert_eq!(confusable_to_latin('日'), None);
    }

    #[test]
    fn skeleton_reveals_imitated_name() {
        // Cyrillic а/у, Greek ο
        assert_eq!(latin_skeleton("pаypal.com"), "paypal.com");
        assert_eq!(latin_skeleton("gοogle.com"), "google.com");
        assert_eq!(latin_skeleton("СУBERPUNK"), "CYBERPUNK");
    }

    #[test]
    fn skeleton_leaves_clean_text_alone() {
        assert_eq!(latin_skeleton("example.com"), "example.com");
        assert_eq!(latin_skeleton("日本語"), "日本語");
    }

    #[test]
    fn classifies_ascii_fast_path() {
        assert_eq!(classify_host("raw.githubusercontent.com"), HostScript::Ascii);
        assert_eq!(classify_host(""), HostScript::Ascii);
    }

    #[test]
    fn classifies_latin_cyrillic_mix() {
        // Cyrillic 'а' (U+0430) looks like Latin 'a'
        assert_eq!(classify_host("pаypal.com"), HostScript::MixedScript);
    }

    #[test]
    fn classifies_latin_greek_mix() {
        // Greek 'ο' (U+03BF) looks like Latin 'o'
        assert_eq!(classify_host("gοogle.com"), HostScript::MixedScript);
    }

    #[test]
    fn classifies_uppercase_mix() {
        // Cyrillic 'А' (U+0410) in an otherwise Latin name
        assert_eq!(classify_host("PАYPAL.COM"), HostScript::MixedScript);
    }

    #[test]
    fn classifies_mix_in_subdomain() {
        // Confusable confined to a subdomain label still mixes with the
        // ASCII registrable domain.
        assert_eq!(classify_host("sеcure.example.com"), HostScript::MixedScript);
    }

    #[test]
    fn cyrillic_with_ascii_tld_is_mixed() {
        // "почта.com": the .com TLD supplies the Latin letters.
        assert_eq!(classify_host("почта.com"), HostScript::MixedScript);
    }

    #[test]
    fn pure_cyrillic_is_non_latin() {
        assert_eq!(classify_host("почта.рф"), HostScript::NonLatin);
    }

    #[test]
    fn japanese_with_ascii_tld_is_non_latin() {
        // Han/Hiragana carry no Latin lookalikes, so this is not a
        // homograph shape even though scripts differ.
        assert_eq!(classify_host("日本語.jp"), HostScript::NonLatin);
    }

    #[test]
    fn accented_latin_is_non_latin() {
        // Single-script Latin with a non-ASCII code point.
        assert_eq!(classify_host("café.com"), HostScript::NonLatin);
    }

    #[test]
    fn armenian_mix_is_mixed() {
        // Armenian 'ա' (U+0561)
        assert_eq!(classify_host("p\u{0561}ypal.com"), HostScript::MixedScript);
    }

    #[test]
    fn cherokee_mix_is_mixed() {
        // Cherokee 'Ꮪ' (U+13DA)
        assert_eq!(classify_host("te\u{13DA}t.com"), HostScript::MixedScript);
    }
}
