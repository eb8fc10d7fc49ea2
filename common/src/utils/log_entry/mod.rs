pub mod grading;
pub mod io;
pub mod network;
pub mod record;
pub mod system;
pub mod task;
