mod chain;
pub use chain::{BeforeAfterChain, MiddlewareChain};
