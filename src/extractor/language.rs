// Caption language validation

/// ISO 639-1 codes plus the regional/script variants caption tracks use
const LANGUAGE_CODES: &[&str] = &[
    "aa", "ab", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh", "bi",
    "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da", "de",
    "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fil", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "haw", "he", "hi", "hmn", "ho", "hr", "ht", "hu",
    "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "iw", "ja", "jv", "ka",
    "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb",
    "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt",
    "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or",
    "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se",
    "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te",
    "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz",
    "ve", "vi", "vo", "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
    // Regional and script variants
    "en-us", "en-gb", "en-ca", "en-au", "en-in", "en-ie", "es-419", "es-es", "es-mx", "es-us",
    "fr-ca", "fr-fr", "de-de", "de-at", "de-ch", "pt-br", "pt-pt", "zh-cn", "zh-tw", "zh-hk",
    "zh-hans", "zh-hant", "sr-latn", "nl-be", "it-it", "ja-jp", "ko-kr", "ru-ru", "ar-sa",
];

/// Check a caption language code against the known set (case-insensitive)
pub fn is_valid_language_code(code: &str) -> bool {
    let normalized = code.trim().replace('_', "-").to_lowercase();
    !normalized.is_empty() && LANGUAGE_CODES.contains(&normalized.as_str())
}

/// Keep the preference only when it is a known code
pub fn validated_language(preference: Option<&str>) -> Option<&str> {
    preference.map(str::trim).filter(|code| is_valid_language_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert!(is_valid_language_code("en"));
        assert!(is_valid_language_code("ES"));
        assert!(is_valid_language_code("pt-BR"));
        assert!(is_valid_language_code("zh_Hant"));
    }

    #[test]
    fn test_unknown_codes() {
        assert!(!is_valid_language_code(""));
        assert!(!is_valid_language_code("english"));
        assert!(!is_valid_language_code("xx"));
    }

    #[test]
    fn test_validated_language_drops_invalid() {
        assert_eq!(validated_language(Some("fr")), Some("fr"));
        assert_eq!(validated_language(Some(" de ")), Some("de"));
        assert_eq!(validated_language(Some("klingon")), None);
        assert_eq!(validated_language(None), None);
    }
}
