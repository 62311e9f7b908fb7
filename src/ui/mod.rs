//! Terminal presentation: capability detection, design tokens, and the
//! per-invocation UI context

pub mod context;
pub mod terminal;
pub mod theme;

pub use context::UiContext;
pub use theme::Palette;
