pub mod config;
pub mod corsi;
pub mod event;
pub mod flanker;
pub mod gonogo;
pub mod reaction;
pub mod registry;
pub mod runner;
pub mod trails;

pub use event::Input;
pub use registry::create;
pub use runner::Task;

#[cfg(test)]
pub(crate) mod testutil;
