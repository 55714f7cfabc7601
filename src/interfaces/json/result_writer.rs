use crate::domain::payment::PaymentAuthResult;
use crate::domain::switch::SwitchRequest;
use crate::error::Result;
use std::io::Write;

/// Writes tokens and results as one JSON document per line.
pub struct ResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_pending(&mut self, request: &SwitchRequest) -> Result<()> {
        serde_json::to_writer(&mut self.writer, request)?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Writes the result, or `no result` when the return did not match.
    pub fn write_result(&mut self, result: Option<&PaymentAuthResult>) -> Result<()> {
        match result {
            Some(result) => serde_json::to_writer(&mut self.writer, result.switch_result())?,
            None => write!(self.writer, "no result")?,
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
