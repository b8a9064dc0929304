//! Concrete port implementations.

pub mod csv_data_adapter;
pub mod csv_record_adapter;
pub mod file_config_adapter;
