pub mod renderer;
pub mod surface;
pub mod terminal;

pub use renderer::{DisplayRenderer, DisplayState, RenderTimings, LOADING_PLACEHOLDER};
pub use surface::{BannerKind, DisplaySurface};
pub use terminal::TerminalSurface;
