use crate::domain::account::GatewayAccount;
use crate::error::{Result, WorkflowError};
use std::io::{BufRead, BufReader, Read};

/// Reads gateway account snapshots from newline-delimited JSON.
///
/// Each non-blank line holds one compact account object. A malformed line
/// yields an error for that line only; reading continues with the next one.
/// Objects spread over several lines are not accepted.
pub struct AccountReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> AccountReader<R> {
    /// Creates a new `AccountReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes accounts.
    pub fn accounts(self) -> impl Iterator<Item = Result<GatewayAccount>> {
        self.reader
            .lines()
            .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
            .map(|line| -> Result<GatewayAccount> {
                let line = line?;
                serde_json::from_str(&line).map_err(WorkflowError::from)
            })
    }
}
