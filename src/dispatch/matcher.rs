//! Leaf constraint evaluation.
//!
//! The tree walk finds candidate leaves by path; whether a leaf actually
//! takes the request is decided here, with AND semantics across method,
//! host, header, query and scheme constraints. Header and host names
//! compare case-insensitively, header and query values exactly.

use crate::http_helpers::HttpRequest;
use crate::route::RouteDefinition;

pub(crate) fn constraints_hold(route: &RouteDefinition, req: &HttpRequest) -> bool {
    method_matches(route, req)
        && host_matches(route, req)
        && headers_match(route, req)
        && queries_match(route, req)
        && scheme_matches(route, req)
}

fn method_matches(route: &RouteDefinition, req: &HttpRequest) -> bool {
    route.methods.is_empty() || route.methods.contains(&req.method)
}

fn host_matches(route: &RouteDefinition, req: &HttpRequest) -> bool {
    match &route.host {
        None => true,
        Some(expected) => {
            // the request host may carry a port; the constraint never does
            let host = req.host.split(':').next().unwrap_or(&req.host);
            expected.eq_ignore_ascii_case(host)
        }
    }
}

fn headers_match(route: &RouteDefinition, req: &HttpRequest) -> bool {
    route.headers.iter().all(|(name, expected)| {
        match (req.header(name), expected) {
            (Some(_), None) => true, // presence check
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        }
    })
}

fn queries_match(route: &RouteDefinition, req: &HttpRequest) -> bool {
    route.queries.iter().all(|(key, expected)| {
        match (req.query_params.get(key), expected) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        }
    })
}

fn scheme_matches(route: &RouteDefinition, req: &HttpRequest) -> bool {
    route.schemes.is_empty()
        || route
            .schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&req.scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_helpers::{HttpMethod, HttpResponse};
    use crate::route::handler_fn;

    fn route() -> RouteDefinition {
        RouteDefinition::new(
            "test",
            "/",
            handler_fn(|_req, res: HttpResponse| async move { res }),
        )
    }

    fn request() -> HttpRequest {
        HttpRequest::new(HttpMethod::GET, "/")
    }

    #[test]
    fn test_empty_constraints_match_anything() {
        assert!(constraints_hold(&route(), &request()));
    }

    #[test]
    fn test_method_constraint() {
        let r = route().method(HttpMethod::POST);
        assert!(!constraints_hold(&r, &request()));
        assert!(constraints_hold(
            &r,
            &HttpRequest::new(HttpMethod::POST, "/")
        ));
    }

    #[test]
    fn test_host_constraint_ignores_port_and_case() {
        let r = route().host("example.com");
        assert!(constraints_hold(
            &r,
            &request().with_host("example.com:43256")
        ));
        assert!(constraints_hold(&r, &request().with_host("EXAMPLE.com")));
        assert!(!constraints_hold(&r, &request().with_host("other.com")));
        assert!(!constraints_hold(&r, &request()));
    }

    #[test]
    fn test_header_value_constraint_is_exact() {
        let r = route().header("X-Test-Header", "Is correct");
        assert!(constraints_hold(
            &r,
            &request().with_header("X-Test-Header", "Is correct")
        ));
        assert!(!constraints_hold(
            &r,
            &request().with_header("X-Test-Header", "is correct")
        ));
        assert!(!constraints_hold(&r, &request()));
    }

    #[test]
    fn test_header_presence_constraint() {
        let r = route().header_present("Authorization");
        assert!(constraints_hold(
            &r,
            &request().with_header("authorization", "Bearer x")
        ));
        assert!(!constraints_hold(&r, &request()));
    }

    #[test]
    fn test_query_constraints() {
        let r = route().query("page", "2").query_present("sort");
        assert!(constraints_hold(
            &r,
            &request().with_query("page", "2").with_query("sort", "asc")
        ));
        assert!(!constraints_hold(&r, &request().with_query("page", "2")));
        assert!(!constraints_hold(
            &r,
            &request().with_query("page", "3").with_query("sort", "asc")
        ));
    }

    #[test]
    fn test_scheme_constraint() {
        let r = route().scheme("https");
        assert!(!constraints_hold(&r, &request()));
        assert!(constraints_hold(&r, &request().with_scheme("https")));
        assert!(constraints_hold(&r, &request().with_scheme("HTTPS")));
    }
}
