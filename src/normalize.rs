//! Query-side drug name normalization
//!
//! Names received from the caller are case-folded before lookup. Names
//! written by the importer are stored verbatim and never pass through here.

/// Separator between names in a query list
pub const LIST_SEPARATOR: char = ',';

/// Uppercase the first character and lowercase the rest.
///
/// The whole string is lowercased first, then the leading character is
/// uppercased. A leading character whose uppercase form expands to several
/// characters (e.g. `ß`) stays lowercase so the result is a fixed point.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut upper = first.to_uppercase();
    let head = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };

    let mut normalized = String::with_capacity(lowered.len());
    normalized.push(head);
    normalized.push_str(chars.as_str());
    normalized
}

/// Split a comma-separated list and normalize each entry.
///
/// Entries are trimmed of surrounding whitespace. Empty entries are kept so
/// that a stray separator surfaces as an unknown drug at validation time.
pub fn parse_drug_list(list: &str) -> Vec<String> {
    list.split(LIST_SEPARATOR)
        .map(|entry| normalize_name(entry.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_name("aspirin"), "Aspirin");
        assert_eq!(normalize_name("WARFARIN"), "Warfarin");
        assert_eq!(normalize_name("aCeTaMiNoPhEn"), "Acetaminophen");
        assert_eq!(normalize_name("a"), "A");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_normalize_keeps_non_letters() {
        assert_eq!(normalize_name("5-fluorouracil"), "5-fluorouracil");
        assert_eq!(normalize_name("ALPHA-TOCOPHEROL ACETATE"), "Alpha-tocopherol acetate");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "aspirin",
            "WARFARIN",
            "Insulin Glargine",
            "ßeta",
            "ÉPINÉPHRINE",
            "ΣΑΣ",
            "İbuprofen",
            "ǆ",
            "1,2-dichloro",
            " leading space",
        ];
        for sample in samples {
            let once = normalize_name(sample);
            assert_eq!(normalize_name(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_parse_drug_list() {
        assert_eq!(
            parse_drug_list("aspirin,WARFARIN, ibuprofen "),
            vec!["Aspirin", "Warfarin", "Ibuprofen"]
        );
        assert_eq!(parse_drug_list("aspirin"), vec!["Aspirin"]);
        assert_eq!(parse_drug_list("aspirin,"), vec!["Aspirin", ""]);
    }
}
