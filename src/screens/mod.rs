pub mod confirm_delete;
pub mod confirm_quit;
pub mod menu_form;
pub mod menu_list;
pub mod notice;

pub use confirm_delete::ConfirmDeleteScreen;
pub use confirm_quit::ConfirmQuitScreen;
pub use menu_form::MenuFormScreen;
pub use menu_list::MenuListScreen;
pub use notice::NoticeScreen;
