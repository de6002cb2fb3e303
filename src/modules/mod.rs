pub mod chrome;
pub mod clipboard;
pub mod navigation;
pub mod search;
pub mod theme;
pub mod toast;
