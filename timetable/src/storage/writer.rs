//! Timetable file writer.

use std::io::{self, Write};

use crate::domain::{Schedule, Stops};

/// Write every stop and schedule in the line-oriented timetable format.
///
/// The output is always complete: the file is rewritten from scratch on
/// every save.
pub fn write_timetable<W: Write>(
    out: &mut W,
    stops: &Stops,
    schedules: &[Schedule],
) -> io::Result<()> {
    writeln!(out, "STOPS:{}", stops.len())?;
    for stop in stops {
        writeln!(out, "{}", stop.name())?;
        writeln!(out, "{}", stop.coordinate())?;
    }

    writeln!(out, "SCHEDULES:{}", schedules.len())?;
    for schedule in schedules {
        write_schedule(out, schedule)?;
    }
    Ok(())
}

fn write_schedule<W: Write>(out: &mut W, schedule: &Schedule) -> io::Result<()> {
    let route = schedule.route();
    let vehicle = route.vehicle();
    let start = schedule.start_time();

    writeln!(out, "ROUTE_START")?;
    writeln!(out, "{}", vehicle.kind.display_name())?;
    writeln!(out, "{}", vehicle.id)?;
    writeln!(out, "{} {}", start.hour(), start.minute())?;

    writeln!(out, "DAYS:{}", route.days().len())?;
    for day in route.days() {
        writeln!(out, "{day}")?;
    }

    writeln!(out, "ROUTE_STOPS:{}", route.stops().len())?;
    for stop in route.stops() {
        writeln!(out, "{}", stop.name)?;
    }

    writeln!(out, "TRAVEL_TIMES:{}", route.travel_times().len())?;
    for minutes in route.travel_times() {
        writeln!(out, "{minutes}")?;
    }

    writeln!(out, "ROUTE_END")
}
