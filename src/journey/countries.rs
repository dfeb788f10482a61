//! Country code → numeric location-code prefix (UIC country codes).

const COUNTRY_PREFIXES: &[(&str, &str)] = &[
    ("AT", "81"),
    ("BE", "88"),
    ("CH", "85"),
    ("CZ", "54"),
    ("DE", "80"),
    ("DK", "86"),
    ("ES", "71"),
    ("FR", "87"),
    ("GB", "70"),
    ("HR", "78"),
    ("HU", "55"),
    ("IT", "83"),
    ("LU", "82"),
    ("NL", "84"),
    ("NO", "76"),
    ("PL", "51"),
    ("SE", "74"),
    ("SI", "79"),
    ("SK", "56"),
];

/// Numeric prefix for an ISO 3166 alpha-2 code, case-insensitive.
pub fn numeric_prefix(country: &str) -> Option<&'static str> {
    COUNTRY_PREFIXES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country))
        .map(|(_, prefix)| *prefix)
}
