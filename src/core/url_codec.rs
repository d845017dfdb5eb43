// CompanyScope - core/url_codec.rs
//
// Mapping between the filter state and a shareable query string.
//
// Format (application/x-www-form-urlencoded):
//   country=<value>   repeatable, one per selected country
//   industry=<value>  repeatable, one per selected industry
//   search=<term>     at most one, omitted when the trimmed term is empty
//
// Decoding never fails: unknown parameters are ignored and anything missing
// falls back to the empty selection / empty term.

use crate::core::filter::FilterState;
use crate::util::constants::{PARAM_COUNTRY, PARAM_INDUSTRY, PARAM_SEARCH};
use url::form_urlencoded;

/// Serialise `filters` to a query string (without the leading `?`).
///
/// Countries come first, then industries, each in set order; the search
/// term is trimmed before it is written.
pub fn encode(filters: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for country in &filters.countries {
        serializer.append_pair(PARAM_COUNTRY, country);
    }
    for industry in &filters.industries {
        serializer.append_pair(PARAM_INDUSTRY, industry);
    }

    let search = filters.search.trim();
    if !search.is_empty() {
        serializer.append_pair(PARAM_SEARCH, search);
    }

    serializer.finish()
}

/// Parse a query string into a filter state. A leading `?` is accepted.
///
/// When `search` appears more than once the first value wins.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterState::default();
    let mut search_seen = false;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_COUNTRY => {
                filters.countries.insert(value.into_owned());
            }
            PARAM_INDUSTRY => {
                filters.industries.insert(value.into_owned());
            }
            PARAM_SEARCH if !search_seen => {
                filters.search = value.into_owned();
                search_seen = true;
            }
            _ => {
                tracing::trace!(param = %key, "Ignoring query parameter");
            }
        }
    }

    filters
}

/// Page location carrying the filter state: `path?query`.
pub fn location(path: &str, filters: &FilterState) -> String {
    format!("{path}?{}", encode(filters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &str) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.sort();
        pairs
    }

    fn state(countries: &[&str], industries: &[&str], search: &str) -> FilterState {
        FilterState {
            countries: countries.iter().map(|c| c.to_string()).collect(),
            industries: industries.iter().map(|i| i.to_string()).collect(),
            search: search.to_string(),
        }
    }

    #[test]
    fn test_state_round_trip() {
        let original = state(&["USA", "UK"], &[], "foo");
        let decoded = decode(&encode(&original));
        assert_eq!(decoded.countries.len(), 2);
        assert!(decoded.countries.contains("USA"));
        assert!(decoded.countries.contains("UK"));
        assert_eq!(decoded.search, "foo");
        assert!(decoded.industries.is_empty());
    }

    #[test]
    fn test_encoder_output_survives_decode_encode() {
        for original in [
            state(&[], &[], ""),
            state(&["USA"], &["Tech", "Finance & Banking"], "big co"),
            state(&["Côte d'Ivoire", "UK"], &["n/a"], "a=b&c"),
        ] {
            let emitted = encode(&original);
            let re_emitted = encode(&decode(&emitted));
            assert_eq!(pairs(&emitted), pairs(&re_emitted), "query: {emitted}");
        }
    }

    #[test]
    fn test_search_trimmed_and_omitted_when_blank() {
        assert_eq!(encode(&state(&[], &[], "   ")), "");
        assert_eq!(encode(&state(&[], &[], "  acme ")), "search=acme");
    }

    #[test]
    fn test_encoding_escapes_reserved_characters() {
        let query = encode(&state(&[], &["Finance & Banking"], "a b"));
        assert_eq!(query, "industry=Finance+%26+Banking&search=a+b");
    }

    #[test]
    fn test_decode_ignores_unknown_and_tolerates_question_mark() {
        let filters = decode("?page=3&country=USA&utm_source=x&industry=Tech");
        assert_eq!(filters, state(&["USA"], &["Tech"], ""));
    }

    #[test]
    fn test_decode_first_search_wins() {
        let filters = decode("search=first&search=second");
        assert_eq!(filters.search, "first");
    }

    #[test]
    fn test_decode_malformed_input_defaults() {
        assert_eq!(decode(""), FilterState::default());
        assert_eq!(decode("&&=&country"), state(&[""], &[], ""));
        assert_eq!(decode("%ZZ=1"), FilterState::default());
    }

    #[test]
    fn test_location() {
        let filters = state(&["UK"], &[], "");
        assert_eq!(location("/dashboard", &filters), "/dashboard?country=UK");
    }
}
