//! Interactive exploration session: prompts for a city and filters, prints
//! the statistics, then pages through raw rows on request.

use std::io::{BufRead, Write};

use anyhow::Result;
use bikeshare_stats::{
    analyzers::analyze,
    error::BikeshareError,
    filter::{MonthSelector, WeekdaySelector, filter},
    loader::TripLoader,
    output::{render_report, write_rows},
    pager::{PAGE_SIZE, PageCursor, page},
    records::TripCollection,
};
use tracing::{info, warn};

pub struct Session<R, W> {
    input: R,
    output: W,
    loader: TripLoader,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, loader: TripLoader) -> Self {
        Self {
            input,
            output,
            loader,
        }
    }

    /// Runs analysis rounds until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        loop {
            if !self.round()? {
                break;
            }
            if !self.confirm("\nWould you like to restart? Enter yes or no.")? {
                break;
            }
        }

        info!("Exploration session finished");
        Ok(())
    }

    /// One prompt/analyze/browse round. Returns `false` if input ended
    /// before the filters were chosen.
    fn round(&mut self) -> Result<bool> {
        let registry = self.loader.registry().clone();
        let cities = registry.cities().collect::<Vec<_>>().join(", ");

        let Some(city) = self.ask(
            &format!("Enter the city you want to view data for ({cities}):"),
            |answer| registry.resolve(answer).map(str::to_string),
        )?
        else {
            return Ok(false);
        };
        let Some(month) = self.ask(
            &format!(
                "Specify a month for filtering ({}):",
                MonthSelector::choices().join(", ")
            ),
            str::parse::<MonthSelector>,
        )?
        else {
            return Ok(false);
        };
        let Some(weekday) = self.ask(
            &format!(
                "If you have a specific day in mind, please enter it ({}):",
                WeekdaySelector::choices().join(", ")
            ),
            str::parse::<WeekdaySelector>,
        )?
        else {
            return Ok(false);
        };
        writeln!(self.output, "{}", "-".repeat(40))?;

        let outcome = match self.loader.load(&city) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(city = %city, error = %e, "Could not load trip data");
                writeln!(self.output, "Could not load data for {city}: {e}")?;
                return Ok(true);
            }
        };
        let trips = filter(&outcome.collection, month, weekday);

        match analyze(&trips, month, weekday) {
            Ok(report) => write!(self.output, "{}", render_report(&report))?,
            Err(e @ BikeshareError::EmptyResult { .. }) => {
                writeln!(self.output, "No trips match this selection ({e}).")?;
                return Ok(true);
            }
            Err(e) => return Err(e.into()),
        }

        self.browse(&trips)?;
        Ok(true)
    }

    /// Shows pages of raw rows for as long as the user answers `yes`.
    fn browse(&mut self, trips: &TripCollection) -> Result<()> {
        let prompt = format!("Do you want to see {PAGE_SIZE} rows of data? Enter 'yes' or 'no':");
        let mut cursor = PageCursor::start();

        while self.confirm(&prompt)? {
            let current = page(trips, cursor);
            write_rows(&mut self.output, current.records, trips.capabilities())?;
            if current.exhausted {
                writeln!(self.output, "No more rows to display.")?;
                break;
            }
            cursor = current.next;
        }
        Ok(())
    }

    /// Repeats `prompt` until `parse` accepts the answer. `None` on end of input.
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> bikeshare_stats::error::Result<T>,
    ) -> Result<Option<T>> {
        loop {
            writeln!(self.output, "{prompt}")?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        writeln!(self.output, "{prompt}")?;
        Ok(self
            .read_answer()?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    fn read_answer(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_stats::cities::CityRegistry;
    use std::fs;

    const WASHINGTON: &str = "\
Start Time,Start Station,End Station,Trip Duration,User Type
2017-01-02 08:00:00,A,B,600,Subscriber
2017-01-03 08:00:00,A,C,600,Subscriber
2017-01-09 09:00:00,B,C,1200,Customer
2017-01-16 09:00:00,A,B,60,Customer
2017-01-23 09:00:00,A,B,60,Customer
2017-01-30 09:00:00,C,B,60,Customer
2017-02-06 09:00:00,C,A,60,Customer
";

    fn run_session(answers: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
        let loader = TripLoader::new(CityRegistry::builtin(dir.path()));

        let mut out = Vec::new();
        Session::new(answers.as_bytes(), &mut out, loader)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_invalid_answers_are_reprompted() {
        let out = run_session("boston\nWashington\njuly\njanuary\nfunday\nmonday\nno\nno\n");

        assert!(out.contains("Invalid city 'boston'"));
        assert!(out.contains("Invalid month 'july'"));
        assert!(out.contains("Invalid day 'funday'"));
        assert!(out.contains("5 trips in Washington (month: January, day: Monday)"));
        assert!(out.contains("No additional birth year information exists!"));
    }

    #[test]
    fn test_browse_pages_until_exhausted() {
        let out = run_session("washington\nall\nall\nyes\nyes\nno\n");

        // one header per page, 7 rows split 5 + 2
        assert_eq!(out.matches("Start Time,Start Station").count(), 2);
        assert!(out.contains("2017-02-06 09:00:00,C,A,60,Customer"));
        assert!(out.contains("No more rows to display."));
    }

    #[test]
    fn test_empty_selection_reported_and_restart() {
        let out = run_session("washington\nmarch\nall\nyes\nwashington\nall\nsunday\nno\n");
        assert_eq!(out.matches("No trips match this selection").count(), 2);
    }

    #[test]
    fn test_end_of_input_stops_cleanly() {
        let out = run_session("washington\n");
        assert!(out.starts_with("Hello!"));
        assert!(!out.contains("trips in"));
    }
}
