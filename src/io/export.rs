//! CSV export of the household device inventory.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HouseholdSnapshot;

/// Column header for the device report.
const HEADER: &str = "zone_id,zone,admitted,device_id,device,kind,on,consumption_w,active_w";

/// Exports one row per device to a CSV file at the given path.
///
/// Zones without devices produce no rows. Output is deterministic for
/// identical snapshots.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(snapshot: &HouseholdSnapshot, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(snapshot, buf)
}

/// Writes the device report as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(snapshot: &HouseholdSnapshot, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (i, zone) in snapshot.zones.iter().enumerate() {
        let admitted = snapshot.is_admitted(i);
        for d in &zone.devices {
            wtr.write_record(&[
                zone.id.to_string(),
                zone.name.clone(),
                admitted.to_string(),
                d.id.to_string(),
                d.name.clone(),
                d.kind.info().label.to_string(),
                d.on.to_string(),
                d.consumption_w.to_string(),
                d.active_w().to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
