pub mod model_info;
pub mod result_entry;
pub mod run;
pub mod run_create;
pub mod run_status;
