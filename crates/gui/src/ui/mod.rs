pub mod home;
pub mod info_panel;
pub mod status_bar;
