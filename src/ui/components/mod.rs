pub mod input_bar;
pub mod message_list;
pub mod side_panel;
pub mod toasts;

pub use input_bar::InputBar;
pub use message_list::MessageList;
pub use side_panel::SidePanelContent;
pub use toasts::ToastOverlay;
