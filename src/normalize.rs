//! Diacritic folding for accent-insensitive search keys.

use unicode_normalization::UnicodeNormalization;

use crate::models::Facility;

/// Strip Vietnamese diacritics while preserving case.
///
/// Decomposes to NFD, drops the combining diacritical marks block
/// (U+0300..U+036F), and maps đ/Đ to d/D, which do not decompose like the
/// other marked letters. Idempotent.
pub fn remove_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            _ => c,
        })
        .collect()
}

/// Lower-cased ASCII search key for a textual field.
pub fn search_key(text: &str) -> String {
    remove_diacritics(text).to_lowercase()
}

/// Write the derived search keys onto a facility record: name, city,
/// district, and every alias.
pub fn normalize_facility(facility: &mut Facility) {
    facility.name_ascii = Some(search_key(&facility.name));
    facility.city_ascii = facility.city.as_deref().map(search_key);
    facility.district_ascii = facility.district.as_deref().map(search_key);
    facility.aliases_ascii = facility.aliases.iter().map(|alias| search_key(alias)).collect();
}
