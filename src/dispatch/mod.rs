mod matcher;
mod router;

pub use router::Router;
