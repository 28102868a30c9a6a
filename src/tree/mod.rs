mod node;
pub use node::{PrefixNode, RouteLeaf};
pub(crate) use node::{is_placeholder, placeholder_name, segmentize};

mod prefix_builder;
pub use prefix_builder::PrefixTreeBuilder;

mod resource_builder;
pub use resource_builder::ResourceTreeBuilder;
