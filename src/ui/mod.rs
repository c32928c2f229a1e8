/// Popup UI modules
pub mod components;
pub mod education;
pub mod popup;
pub mod state;
