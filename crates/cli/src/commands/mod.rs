pub mod components;
pub mod compose;
pub mod config_cmd;
