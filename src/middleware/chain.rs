use std::sync::Arc;

use crate::route::{Handler, Middleware};

/// Uniform onion composition over an ordered middleware stack.
///
/// Declaration order is outer-to-inner nesting order: composing
/// `[m1, m2, ..., mk]` around `h` yields `m1(m2(...mk(h)...))`, so `m1`'s
/// pre-handler logic runs first and its post-handler logic runs last.
pub struct MiddlewareChain {
    stack: Vec<Middleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn use_middleware(&mut self, middleware: Middleware) {
        self.stack.push(middleware);
    }

    /// Wrap `handler` in the whole stack. The composed handler is a new
    /// value with no further identity; it holds no state across requests.
    pub fn compose(&self, handler: Handler) -> Handler {
        let mut composed = handler;
        for middleware in self.stack.iter().rev() {
            composed = middleware(composed);
        }
        composed
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Middleware>> for MiddlewareChain {
    fn from(stack: Vec<Middleware>) -> Self {
        Self { stack }
    }
}

/// Split before/after composition.
///
/// The `before` list wraps the handler with reversed declaration order as
/// nesting order: the entry at index 0 ends up innermost, so the
/// last-declared entry's pre-logic runs first. The `after` hooks do not
/// nest at all; they run strictly in declaration order once the wrapped
/// handler has returned.
pub struct BeforeAfterChain {
    before: Vec<Middleware>,
    after: Vec<Handler>,
}

impl BeforeAfterChain {
    pub fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    pub fn use_before(&mut self, middleware: Middleware) {
        self.before.push(middleware);
    }

    pub fn use_after(&mut self, hook: Handler) {
        self.after.push(hook);
    }

    pub fn compose(&self, handler: Handler) -> Handler {
        let mut composed = handler;
        // index 0 wraps first, so it sits closest to the terminal handler
        for middleware in self.before.iter() {
            composed = middleware(composed);
        }

        if self.after.is_empty() {
            return composed;
        }

        let after = self.after.clone();
        Arc::new(move |req, res| {
            let composed = composed.clone();
            let after = after.clone();
            Box::pin(async move {
                let mut res = composed(req.clone(), res).await;
                for hook in &after {
                    res = hook(req.clone(), res).await;
                }
                res
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

impl Default for BeforeAfterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl From<(Vec<Middleware>, Vec<Handler>)> for BeforeAfterChain {
    fn from((before, after): (Vec<Middleware>, Vec<Handler>)) -> Self {
        Self { before, after }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse};
    use crate::route::{handler_fn, middleware_fn};

    fn emit(label: &str) -> Handler {
        let label = label.to_string();
        handler_fn(move |_req, mut res: HttpResponse| {
            let label = label.clone();
            async move {
                res.write(&label);
                res
            }
        })
    }

    // Writes its label before delegating inward, like the original suite's
    // middlewareWrapper.
    fn tag(label: &str) -> Middleware {
        let label = label.to_string();
        middleware_fn(move |inner: Handler| {
            let label = label.clone();
            let wrapped: Handler = Arc::new(move |req, mut res| {
                let inner = inner.clone();
                let label = label.clone();
                Box::pin(async move {
                    res.write(&label);
                    inner(req, res).await
                })
            });
            wrapped
        })
    }

    // Writes `<label>-pre` going in and `<label>-post` coming back out.
    fn tag_pre_post(label: &str) -> Middleware {
        let label = label.to_string();
        middleware_fn(move |inner: Handler| {
            let label = label.clone();
            let wrapped: Handler = Arc::new(move |req, mut res| {
                let inner = inner.clone();
                let label = label.clone();
                Box::pin(async move {
                    res.write(&format!("{label}-pre;"));
                    let mut res = inner(req, res).await;
                    res.write(&format!("{label}-post;"));
                    res
                })
            });
            wrapped
        })
    }

    fn request() -> HttpRequest {
        HttpRequest::new(HttpMethod::GET, "/")
    }

    #[tokio::test]
    async fn test_uniform_wrapping_order() {
        let chain = MiddlewareChain::from(vec![tag_pre_post("m1"), tag_pre_post("m2")]);
        let composed = chain.compose(emit("h;"));

        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "m1-pre;m2-pre;h;m2-post;m1-post;");
    }

    #[tokio::test]
    async fn test_uniform_declaration_order_is_execution_order() {
        let mut chain = MiddlewareChain::new();
        chain.use_middleware(tag("1"));
        chain.use_middleware(tag("2"));
        chain.use_middleware(tag("3"));
        assert_eq!(chain.len(), 3);

        let composed = chain.compose(emit("4"));

        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "1234");
    }

    #[tokio::test]
    async fn test_empty_chain_is_identity() {
        let chain = MiddlewareChain::new();
        assert!(chain.is_empty());

        let composed = chain.compose(emit("h"));
        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "h");
    }

    #[tokio::test]
    async fn test_before_after_order() {
        let chain = BeforeAfterChain::from((
            vec![tag("B1"), tag("B2")],
            vec![emit("A1"), emit("A2")],
        ));
        let composed = chain.compose(emit("Handler"));

        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "B2B1HandlerA1A2");
    }

    #[tokio::test]
    async fn test_before_only_reverses_declaration_order() {
        let mut chain = BeforeAfterChain::new();
        chain.use_before(tag("B1"));
        chain.use_before(tag("B2"));
        chain.use_before(tag("B3"));
        let composed = chain.compose(emit("h"));

        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "B3B2B1h");
    }

    #[tokio::test]
    async fn test_after_only_runs_in_declaration_order() {
        let mut chain = BeforeAfterChain::new();
        chain.use_after(emit("A1"));
        chain.use_after(emit("A2"));
        let composed = chain.compose(emit("h"));

        let res = composed(request(), HttpResponse::new()).await;
        assert_eq!(res.body, "hA1A2");
    }
}
