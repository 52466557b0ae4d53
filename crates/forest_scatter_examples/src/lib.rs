#![forbid(unsafe_code)]

mod preset;
mod rendering;
mod terrain;

pub use preset::{load_preset, ForestPreset};
pub use rendering::{init_tracing, render_run_result_to_png, KindStyle, RenderConfig};
pub use terrain::{hills_terrain, SlopeLimitedNavSurface};
