//! ISO 4217 currency code resolution.
//!
//! The ERP currency relation usually carries the code as its label
//! (`[1, "EUR"]`). When it does not, the currency of the fallback country
//! is used, then EUR.

/// Currency used when nothing else resolves.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Home currency per country, for the jurisdictions we export from.
static COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("AT", "EUR"),
    ("BE", "EUR"),
    ("CH", "CHF"),
    ("DE", "EUR"),
    ("ES", "EUR"),
    ("FI", "EUR"),
    ("FR", "EUR"),
    ("GB", "GBP"),
    ("IE", "EUR"),
    ("IT", "EUR"),
    ("LU", "EUR"),
    ("NL", "EUR"),
    ("PT", "EUR"),
    ("US", "USD"),
];

/// Home currency of a country, if known.
pub fn currency_for_country(country_code: &str) -> Option<&'static str> {
    COUNTRY_CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(country_code))
        .ok()
        .map(|idx| COUNTRY_CURRENCIES[idx].1)
}

/// Resolve a currency label to an ISO 4217 code.
///
/// Known codes are accepted case-insensitively; otherwise the currency of
/// `fallback_country`, otherwise [`DEFAULT_CURRENCY`].
pub fn resolve_currency(label: Option<&str>, fallback_country: &str) -> String {
    if let Some(code) = label.map(|l| l.trim().to_uppercase()) {
        if is_known_currency_code(&code) {
            return code;
        }
    }
    currency_for_country(fallback_country)
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string()
}

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// ISO 4217 codes accepted as document currency, sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AED", "AMD", "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EGP", "EUR",
    "GBP", "GEL", "HKD", "HRK", "HUF", "IDR", "ILS", "INR", "ISK", "JPY", "KES", "KRW",
    "KZT", "MXN", "MYR", "NGN", "NOK", "NZD", "PHP", "PLN", "RON", "RUB", "SAR", "SEK",
    "SGD", "THB", "TRY", "TWD", "UAH", "USD", "VND", "ZAR",
];
