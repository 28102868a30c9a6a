#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    PATCH,
    OPTIONS,
    TRACE,
    CONNECT,
}

impl HttpMethod {
    /// Parse an HTTP method from a string (case-insensitive)
    pub fn from_string(method: &str) -> Option<Self> {
        match method.to_lowercase().as_str() {
            "get" => Some(HttpMethod::GET),
            "post" => Some(HttpMethod::POST),
            "put" => Some(HttpMethod::PUT),
            "delete" => Some(HttpMethod::DELETE),
            "patch" => Some(HttpMethod::PATCH),
            "options" => Some(HttpMethod::OPTIONS),
            "head" => Some(HttpMethod::HEAD),
            "trace" => Some(HttpMethod::TRACE),
            "connect" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }

    /// Convert to uppercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}
