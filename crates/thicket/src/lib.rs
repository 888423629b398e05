//! Thicket - a virtualized tree view toolkit.
//!
//! This is the main umbrella crate that re-exports the public APIs of the
//! workspace.
//!
//! # Example
//!
//! ```
//! use thicket::render::Size;
//! use thicket::widget::widgets::{Label, Tree, TreeData};
//!
//! let tree = Tree::new(
//!     TreeData::new()
//!         .with_child_uids(|uid| match uid {
//!             "" => (0..1000).map(|i| format!("item {i}")).collect(),
//!             _ => Vec::new(),
//!         })
//!         .with_create_node(|_branch| Label::new("template"))
//!         .with_update_node(|uid, _branch, label: &mut Label| label.set_text(uid)),
//! );
//! tree.resize(Size::new(240.0, 320.0));
//!
//! // Only the rows that fit in the viewport are materialized.
//! assert!(tree.rendered_rows().len() < 20);
//! assert_eq!(tree.flattened_rows().len(), 1000);
//! ```

pub use thicket_core::*;

/// Geometry primitives.
pub mod render {
    pub use thicket_render::*;
}

pub mod testing;
pub mod theme;
pub mod widget;

pub use theme::{Theme, ThemeError, ThemeResult};
