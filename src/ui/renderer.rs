//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process: the state computes a [`UIViewModel`],
//! then the components draw it with the active palette. Nothing here reads
//! the state directly.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout using `theme`.
///
/// The caller picks the palette matching `state.theme`; the two are kept
/// apart so palettes can come from user files.
pub fn render(state: &AppState, theme: &Theme, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, theme, rows, cols);
}

/// Renders an already computed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_frame(vm, theme, rows, cols);
}
