#[macro_use]
extern crate log;
#[macro_use]
extern crate measure_time;
#[macro_use]
extern crate serde_derive;

pub mod chart;
pub mod experiment;
pub mod export;
pub mod measurements;
pub mod model;
pub mod options;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use crate::experiment::Experiment;
pub use crate::experiment::FittedExperiment;
pub use crate::measurements::Measurements;

pub type Result<T> = std::result::Result<T, failure::Error>;
