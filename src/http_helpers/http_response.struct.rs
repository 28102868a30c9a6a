/// The response value threaded through a composed handler chain.
///
/// Middleware and handlers share one response under construction: a
/// middleware's pre-handler writes land in the body before the inner
/// handler's, its post-handler writes after.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// The dispatcher's no-match outcome.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            ..Self::new()
        }
    }

    /// Append to the response body.
    pub fn write(&mut self, chunk: &str) {
        self.body.push_str(chunk);
    }

    pub fn insert_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Get a specific header value by name (names compare case-insensitively)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_append_in_order() {
        let mut res = HttpResponse::new();
        res.write("12");
        res.write("3");

        assert_eq!(res.body, "123");
        assert_eq!(res.status, 200);
    }

    #[test]
    fn test_not_found() {
        let res = HttpResponse::not_found();
        assert_eq!(res.status, 404);
        assert!(res.body.is_empty());
    }
}
