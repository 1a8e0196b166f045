//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: render-ready snapshot of the state
//! - [`renderer`]: rendering entry point
//! - [`components`]: sidebar, header, card grid, status and footer
//! - [`helpers`]: text fitting, wrapping and match highlighting
//! - [`theme`]: light/dark palettes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Palettes, Theme};
pub use viewmodel::{
    CardItem, ContentState, EmptyState, FooterInfo, HeaderInfo, LayoutInfo, SearchBarInfo,
    SidebarInfo, SidebarPlacement, StatusLine, UIViewModel,
};
