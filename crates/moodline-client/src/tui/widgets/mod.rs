pub mod date_strip;
pub mod help_popup;
pub mod status_bar;
