// Common constants shared by the solver, the config layer and the binary
pub mod constants;
