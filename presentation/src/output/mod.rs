//! Output formatting for prediction results

pub mod console;
