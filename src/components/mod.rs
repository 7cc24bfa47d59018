pub mod confirm;
pub mod event_form;
pub mod event_menu;
pub mod panel;

pub use confirm::ConfirmDelete;
pub use event_form::EventForm;
pub use event_menu::EventMenu;
pub use panel::{Panel, PanelPosition};
