//! Renders a [`CityAnalysis`] as the four-section text report.
//!
//! All presentation lives here; the core statistics routines never print.

use std::io::Write;

use bikeshare_core::calendar;
use bikeshare_core::formatting::{format_count, format_seconds, title_case};
use bikeshare_core::models::DemographicSummary;
use bikeshare_data::analysis::CityAnalysis;

const RULE: &str = "----------------------------------------";

/// Write the full report for one analysis run.
pub fn print_report<W: Write>(city: &str, analysis: &CityAnalysis, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} trips were selected for evaluation in {}",
        format_count(analysis.trips_selected),
        title_case(city)
    )?;
    writeln!(out, "{}", RULE)?;

    if analysis.trips_selected == 0 {
        writeln!(out, "No trips matched the selected filters.")?;
        writeln!(out, "{}", RULE)?;
        return Ok(());
    }

    print_time_section(analysis, out)?;
    print_station_section(analysis, out)?;
    print_duration_section(analysis, out)?;
    print_user_section(analysis, out)?;

    writeln!(
        out,
        "Loaded in {:.3}s, statistics in {:.3}s",
        analysis.metadata.load_time_seconds, analysis.metadata.stats_time_seconds
    )?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn print_time_section<W: Write>(analysis: &CityAnalysis, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nMost frequent times of travel:")?;
    if let Some(time) = &analysis.time_stats {
        let month = calendar::month_name(time.popular_month).unwrap_or("unknown");
        writeln!(out, "  most popular month to rent: {}", title_case(month))?;
        writeln!(
            out,
            "  most popular day of the week:  {}",
            title_case(&time.popular_day)
        )?;
        writeln!(out, "  most popular hour to rent:  {}", time.popular_hour)?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn print_station_section<W: Write>(analysis: &CityAnalysis, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nMost popular stations and trip:")?;
    let stations = &analysis.station_stats;
    if let Some(start) = &stations.popular_start {
        writeln!(
            out,
            "  start station: {} ({} trips)",
            start.name,
            format_count(start.count)
        )?;
    }
    if let Some(end) = &stations.popular_end {
        writeln!(
            out,
            "  end station:   {} ({} trips)",
            end.name,
            format_count(end.count)
        )?;
    }
    if let Some(route) = &stations.popular_route {
        writeln!(
            out,
            "  route:         {} -> {} ({} trips)",
            route.start,
            route.end,
            format_count(route.count)
        )?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn print_duration_section<W: Write>(analysis: &CityAnalysis, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nTrip duration:")?;
    if let Some(duration) = &analysis.duration_stats {
        writeln!(
            out,
            "  total travel time:   {} ({:.0} seconds)",
            format_seconds(duration.total_seconds),
            duration.total_seconds
        )?;
        writeln!(
            out,
            "  average travel time: {} ({:.1} seconds)",
            format_seconds(duration.mean_seconds),
            duration.mean_seconds
        )?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn print_user_section<W: Write>(analysis: &CityAnalysis, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\nUser statistics:")?;
    writeln!(out, "  trips by user type:")?;
    for (user_type, count) in &analysis.user_stats.user_type_counts {
        writeln!(out, "    {:<12} {}", user_type, format_count(*count))?;
    }

    match &analysis.user_stats.demographics {
        DemographicSummary::Available {
            gender_counts,
            birth_years,
        } => {
            writeln!(out, "  trips by gender:")?;
            for (gender, count) in gender_counts {
                writeln!(out, "    {:<12} {}", gender, format_count(*count))?;
            }
            writeln!(out, "  earliest birth year:    {}", birth_years.earliest)?;
            writeln!(out, "  most recent birth year: {}", birth_years.latest)?;
            writeln!(out, "  most common birth year: {}", birth_years.most_common)?;
        }
        DemographicSummary::Unavailable => {
            writeln!(out, "  gender and birth year are unavailable for this city")?;
        }
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}
