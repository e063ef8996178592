pub mod data_set_fitter;
pub mod fitter;
pub mod snapshot_fitters;
