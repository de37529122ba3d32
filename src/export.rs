//! CSV export of the ranking.

use crate::logic::Stats;
use chrono::{DateTime, TimeZone};

/// Header row first, then one row per standing in ranking order.
pub fn standings_csv(stats: &Stats) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "name", "wins", "losses", "net", "total"])?;
    for s in &stats.ranking {
        wtr.write_record([
            s.rank.to_string(),
            s.name.clone(),
            s.wins.to_string(),
            s.losses.to_string(),
            s.net.to_string(),
            s.total.to_string(),
        ])?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Download name, e.g. `standings-20261015-2130.csv`.
pub fn standings_filename<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("standings-{}.csv", at.format("%Y%m%d-%H%M"))
}
