use crate::domain::credential::PaymentProvider;
use crate::domain::task::{JourneyContext, Task, Tasks};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Task list for one account plus the aggregate answers a page needs.
#[derive(Debug, Serialize)]
pub struct TaskListReport<'a> {
    pub account: &'a str,
    pub provider: PaymentProvider,
    pub context: JourneyContext,
    pub has_recurring_tasks: bool,
    pub all_complete: bool,
    pub next_task: Option<&'static str>,
    pub tasks: &'a [Task],
}

impl<'a> TaskListReport<'a> {
    pub fn new(account_external_id: &'a str, tasks: &'a Tasks) -> Self {
        Self {
            account: account_external_id,
            provider: tasks.provider(),
            context: tasks.context(),
            has_recurring_tasks: tasks.has_recurring_tasks(),
            all_complete: tasks.all_complete(),
            next_task: tasks.next_incomplete().map(|task| task.id),
            tasks: tasks.all(),
        }
    }
}

/// Writes task list reports as newline-delimited JSON.
pub struct TaskListWriter<W: Write> {
    writer: W,
}

impl<W: Write> TaskListWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, report: &TaskListReport<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
