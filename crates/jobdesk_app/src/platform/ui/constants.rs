use std::time::Duration;

pub const TOOLBAR_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;
pub const FILES_HEADER_HEIGHT: u16 = 4;
pub const VIEWER_PERCENT_X: u16 = 80;
pub const VIEWER_PERCENT_Y: u16 = 80;
pub const ALERT_WIDTH: u16 = 60;
pub const ALERT_HEIGHT: u16 = 7;
pub const BUTTON_GAP: u16 = 1;
pub const EVENT_POLL: Duration = Duration::from_millis(75);
