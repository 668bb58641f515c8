//! Remote links: mirror a legacy panel's content onto other blocks
//!
//! A panel whose name contains a tag such as `[RLC Sign/ScreenArea]` mirrors
//! everything it renders onto the `ScreenArea` material of the block named
//! `Sign` on the same construct. The tag is re-parsed whenever the name
//! changes. The scheduler does not depend on any of this.

mod parser;
mod table;

pub use parser::{parse_link_tag, LinkSpec};
pub use table::{LinkResolver, LinkTable, LinkTarget};
