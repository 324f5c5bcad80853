//! UI widgets and layout for termhub.

pub mod ansi;
pub mod help_bar;
pub mod input_line;
pub mod layout;
pub mod scrollback;
pub mod tabs;
pub mod toast;
pub mod toast_widget;
