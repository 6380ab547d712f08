pub mod constants;
pub mod layout;
pub mod render;

use jobdesk_core::{Command, FileId, JobId};
use ratatui::layout::Rect;

pub use render::render;

/// Clickable regions of the last drawn frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    pub toolbar: Vec<(Rect, Command)>,
    pub jobs: Vec<(Rect, JobId)>,
    pub files: Vec<(Rect, FileId)>,
    /// Modal surface of the open viewer; everything else is backdrop.
    pub viewer: Option<Rect>,
}
