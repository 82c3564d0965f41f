pub mod action_list;
pub mod help_overlay;
