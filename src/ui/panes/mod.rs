//! TUI pane rendering modules
//!
//! Every pane is a stateless render function over data the app reads from
//! the playback controller.
//!
//! - [`code`]: topic source with the current step's highlighted lines
//! - [`scene`]: visualization of the current step's payload
//! - [`narration`]: step title, explanation and progress dots
//! - [`status`]: transport bar with keybindings and play state

pub mod code;
pub mod narration;
pub mod scene;
pub mod status;

pub use code::render_code_pane;
pub use narration::{render_narration_pane, NarrationRenderData};
pub use scene::render_scene_pane;
pub use status::{render_status_bar, StatusRenderData};
