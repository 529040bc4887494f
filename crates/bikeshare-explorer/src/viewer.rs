//! Paginated raw-trip viewer.
//!
//! Shows the filtered records a page at a time: `yes` fetches the next
//! page, `no` stops, anything else re-prompts. Output formatting is a
//! presentation choice owned entirely by this module.

use std::io::{BufRead, Write};

use bikeshare_core::models::{CityDataset, TripRecord};

/// The slice of records for one page. Clamped: requesting past the end
/// yields an empty slice.
pub fn page(dataset: &CityDataset, offset: usize, page_size: usize) -> &[TripRecord] {
    let start = offset.min(dataset.len());
    let end = (offset + page_size).min(dataset.len());
    &dataset.records[start..end]
}

/// Run the interactive viewer loop over line-based I/O.
pub fn run_viewer<R: BufRead, W: Write>(
    dataset: &CityDataset,
    page_size: usize,
    mut input: R,
    output: &mut W,
) -> std::io::Result<()> {
    if dataset.is_empty() {
        writeln!(output, "There are no trips to show.")?;
        return Ok(());
    }

    writeln!(
        output,
        "\nWould you like to see individual trip data, {} trips at a time?",
        page_size
    )?;
    writeln!(output, "Enter yes to show the next page, no to stop.")?;

    let mut offset = 0;
    loop {
        write!(output, "Show trip data? ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim().to_lowercase().as_str() {
            "yes" => {
                let records = page(dataset, offset, page_size);
                for (i, record) in records.iter().enumerate() {
                    print_record(offset + i + 1, record, output)?;
                }
                offset += records.len();
                if offset >= dataset.len() {
                    writeln!(output, "No more trips to show.")?;
                    return Ok(());
                }
            }
            "no" => {
                writeln!(output, "Exiting trip display.")?;
                return Ok(());
            }
            other => {
                writeln!(
                    output,
                    "Only yes and no are valid entries. You entered '{}'.",
                    other
                )?;
            }
        }
    }
}

/// One record, one block. Missing demographic values show an explicit
/// placeholder rather than being skipped.
fn print_record<W: Write>(number: usize, record: &TripRecord, output: &mut W) -> std::io::Result<()> {
    writeln!(output, "Trip {}:", number)?;
    writeln!(output, "  start time: {}", record.start_time)?;
    writeln!(output, "  duration:   {} seconds", record.duration_seconds)?;
    writeln!(output, "  from:       {}", record.start_station)?;
    writeln!(output, "  to:         {}", record.end_station)?;
    writeln!(output, "  user type:  {}", record.user_type)?;
    writeln!(
        output,
        "  gender:     {}",
        record.gender.as_deref().unwrap_or("(not available)")
    )?;
    match record.birth_year {
        Some(year) => writeln!(output, "  birth year: {}", year)?,
        None => writeln!(output, "  birth year: (not available)")?,
    }
    Ok(())
}
