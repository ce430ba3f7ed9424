// Standalone components
pub mod badge;
pub mod button;
pub mod data_table;
pub mod empty_state;
pub mod file_drop;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod skeleton;

// Primitive wrappers
pub mod alert_dialog;
pub mod dialog;
pub mod dropdown_menu;
pub mod switch;
pub mod toast;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use data_table::*;
pub use dialog::*;
pub use dropdown_menu::*;
pub use empty_state::*;
pub use file_drop::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use skeleton::*;
pub use switch::*;
pub use toast::*;
