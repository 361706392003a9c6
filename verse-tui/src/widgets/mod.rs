//! Reusable widget components.

pub mod detail;
pub mod status;
pub mod text_input;

pub use detail::DetailPanel;
pub use status::StatusIndicator;
pub use text_input::TextInput;
