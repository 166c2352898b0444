//! CSV export of rank comparison reports.

use std::io::Write;

use crate::error::Result;

use super::engine::RankDiffReport;

impl RankDiffReport {
    /// Write rows as CSV with a header line.
    ///
    /// With `reported_only`, rows within tolerance are left out.
    pub fn write_csv<W: Write>(&self, writer: W, reported_only: bool) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            if reported_only && !self.is_reported(row) {
                continue;
            }
            csv_writer.serialize(row)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
