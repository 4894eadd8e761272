pub mod config_wrapper;
