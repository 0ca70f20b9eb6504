//! JSON adapters: account snapshots in, task list reports out.

pub mod account_reader;
pub mod task_writer;
