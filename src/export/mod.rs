//! Export orchestration: disk inputs to a finished .pdb file

pub mod config;
pub mod pipeline;
