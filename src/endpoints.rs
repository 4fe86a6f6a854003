//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/envelopes/{envelope_id}',
//! use [format_endpoint].

/// The root route, which serves the budget summary.
pub const ROOT: &str = "/";
/// The route to create and list envelopes.
pub const ENVELOPES: &str = "/api/envelopes";
/// The route to get, update or delete a single envelope.
pub const ENVELOPE: &str = "/api/envelopes/{envelope_id}";
/// The route to transfer funds between two envelopes.
pub const TRANSFER: &str = "/api/envelopes/transfer/{from_id}/{to_id}";
/// The route to post and list transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to get or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the budget summary.
pub const SUMMARY: &str = "/api/summary";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/envelopes/{envelope_id}',
/// '{envelope_id}' is the parameter.
///
/// Paths with multiple parameters (e.g. the transfer route) can be filled in
/// by applying this function once per parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::ENVELOPES);
        assert_endpoint_is_valid_uri(endpoints::ENVELOPE);
        assert_endpoint_is_valid_uri(endpoints::TRANSFER);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::ENVELOPE, 1);

        assert_eq!(formatted_path, "/api/envelopes/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::ENVELOPES, 1);

        assert_eq!(formatted_path, "/api/envelopes");
    }

    #[test]
    fn fills_multiple_parameters_one_at_a_time() {
        let formatted_path = format_endpoint(endpoints::TRANSFER, 1);
        let formatted_path = format_endpoint(&formatted_path, 2);

        assert_eq!(formatted_path, "/api/envelopes/transfer/1/2");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
