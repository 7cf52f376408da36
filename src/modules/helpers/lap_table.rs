use crate::modules::models::lap::LapRecord;

pub const NO_LAP_DATA: &str = "No lap data";
const MISSING: &str = "-";

pub struct LapTable {}

impl LapTable {
    /// # render lap table
    /// render the laps as a fixed width table for monospace output. the start
    /// lap is labelled `S`, values without a signal are shown as `-`.
    ///
    /// ## Arguments
    /// * `laps` - the laps of one competitor
    ///
    /// ## Returns
    /// * `String` - the table, one line per lap
    pub fn render(laps: &[LapRecord]) -> String {
        if laps.is_empty() {
            return NO_LAP_DATA.to_string();
        }

        let mut table = LapTable::line(["#", "Time", "S1", "S2", "S3", "S4"]);
        table.push_str(&LapTable::line(["--", "--------", "--------", "--------", "--------", "--------"]));

        for lap in laps {
            let label = if lap.is_start_lap() {
                "S".to_string()
            } else {
                lap.lap_number.to_string()
            };
            let [s1, s2, s3, s4] = lap.sectors();

            table.push_str(&LapTable::line([
                label.as_str(),
                lap.lap_time.as_deref().unwrap_or(MISSING),
                if lap.is_start_lap() { MISSING } else { s1.unwrap_or(MISSING) },
                s2.unwrap_or(MISSING),
                s3.unwrap_or(MISSING),
                s4.unwrap_or(MISSING),
            ]));
        }

        table.trim_end().to_string()
    }

    fn line(cells: [&str; 6]) -> String {
        let line = format!(
            "{:^2}  {:<8}  {:<8}  {:<8}  {:<8}  {:<8}",
            cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
        );
        format!("{}\n", line.trim_end())
    }
}
