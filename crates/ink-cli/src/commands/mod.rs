pub mod config_ops;
pub mod drill;
pub mod practice_ops;
