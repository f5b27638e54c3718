pub mod actions_panel;
pub mod chat_panel;
pub mod file_browser;
pub mod header;
pub mod maps_panel;
pub mod preview_pane;
pub mod right_panel;
pub mod runs_panel;
pub mod tab_bar;
pub mod workflow_panel;
