//! Country code resolution.
//!
//! ERP relations hand us localized country *names* ("België", "Pays-Bas"),
//! not codes. Resolution is an explicit label-substring table; anything it
//! does not recognise falls back to the exporting company's jurisdiction.

/// Jurisdiction used when nothing else resolves.
pub const DEFAULT_COUNTRY: &str = "BE";

/// Localized country names, matched by substring containment.
static COUNTRY_LABELS: &[(&str, &[&str])] = &[
    ("BE", &["Belgium", "België", "Belgique", "Belgien"]),
    ("NL", &["Netherlands", "Nederland", "Pays-Bas", "Niederlande"]),
    ("DE", &["Germany", "Deutschland", "Allemagne", "Duitsland"]),
    ("FR", &["France", "Frankrijk", "Frankreich"]),
    ("LU", &["Luxembourg", "Luxemburg"]),
    ("AT", &["Austria", "Österreich", "Oostenrijk", "Autriche"]),
    ("ES", &["Spain", "España", "Spanje", "Espagne", "Spanien"]),
    ("IT", &["Italy", "Italia", "Italië", "Italie", "Italien"]),
    ("IE", &["Ireland", "Ierland", "Irlande", "Irland"]),
    ("PT", &["Portugal"]),
    ("FI", &["Finland", "Suomi", "Finlande", "Finnland"]),
    ("GB", &["United Kingdom", "Verenigd Koninkrijk", "Royaume-Uni", "Vereinigtes Königreich"]),
    ("US", &["United States", "Verenigde Staten", "États-Unis", "Vereinigte Staaten"]),
    ("CH", &["Switzerland", "Zwitserland", "Suisse", "Schweiz"]),
];

/// Resolve a country label to an ISO 3166-1 alpha-2 code.
///
/// A label that already is a known code ("NL") is taken as is. Otherwise the
/// first table entry whose localized name occurs in the label wins.
pub fn country_code_for_label(label: &str) -> Option<&'static str> {
    let trimmed = label.trim();
    if let Ok(idx) = COUNTRY_CODES.binary_search(&trimmed) {
        return Some(COUNTRY_CODES[idx]);
    }
    COUNTRY_LABELS
        .iter()
        .find(|(_, names)| names.iter().any(|n| trimmed.contains(n)))
        .map(|(code, _)| *code)
}

/// Resolve a country label, falling back to `fallback` when unmatched.
/// Never returns an empty code.
pub fn resolve_country(label: Option<&str>, fallback: &str) -> String {
    label
        .and_then(country_code_for_label)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if is_known_country_code(fallback) {
                fallback.to_string()
            } else {
                DEFAULT_COUNTRY.to_string()
            }
        })
}

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code.
pub fn is_known_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// ISO 3166-1 alpha-2 codes, sorted for binary search.
static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];
