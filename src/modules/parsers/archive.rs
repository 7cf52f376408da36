use chrono::NaiveDate;
use log::{debug, warn};
use scraper::{ElementRef, Html};
use snafu::OptionExt;

use crate::errors::{ContainerNotFoundSnafu, CustomResult};
use crate::modules::helpers::html::{child_elements, element_text, has_class, selector};
use crate::modules::models::race::{DayRaces, RaceRef};

pub const ARCHIVE_CONTAINER: &str = ".archiveData";
pub const DATE_HEADER_CLASS: &str = "archiveDateHeader";
pub const DATA_ROW_CLASS: &str = "archiveDataRow";
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// the date that is currently collecting races, `None` while no parseable header was seen
type OpenDay = Option<(NaiveDate, Vec<RaceRef>)>;

pub struct ArchiveParser {}

impl ArchiveParser {
    /// # parse archive page
    /// group the race links on the archive page under their date headers.
    /// the children of the archive container are a flat list of date headers,
    /// each followed by the rows of the races driven on that date.
    ///
    /// ## Arguments
    /// * `html` - the archive page
    ///
    /// ## Returns
    /// * `Vec<DayRaces>` - the days in page order. days without races are left out
    pub fn parse(html: &str) -> CustomResult<Vec<DayRaces>> {
        let document = Html::parse_document(html);
        let container_selector = selector(ARCHIVE_CONTAINER)?;

        let container = document
            .select(&container_selector)
            .next()
            .context(ContainerNotFoundSnafu { selector: ARCHIVE_CONTAINER })?;

        let (mut days, open) = child_elements(container).fold(
            (Vec::new(), None),
            |(mut days, open): (Vec<DayRaces>, OpenDay), child| {
                if has_class(&child, DATE_HEADER_CLASS) {
                    ArchiveParser::close_day(&mut days, open);
                    (days, ArchiveParser::open_day(&child))
                } else if has_class(&child, DATA_ROW_CLASS) {
                    (days, ArchiveParser::add_race(open, &child))
                } else {
                    (days, open)
                }
            },
        );
        ArchiveParser::close_day(&mut days, open);

        Ok(days)
    }

    fn close_day(days: &mut Vec<DayRaces>, open: OpenDay) {
        if let Some((date, races)) = open {
            if races.is_empty() {
                debug!(target:"parsers/archive:parse", "date header without races, skipping {}", date);
            } else {
                days.push(DayRaces { date, races });
            }
        }
    }

    fn open_day(header: &ElementRef) -> OpenDay {
        let date_text = element_text(header);
        match NaiveDate::parse_from_str(&date_text, DATE_FORMAT) {
            Ok(date) => Some((date, Vec::new())),
            Err(error) => {
                warn!(target:"parsers/archive:parse", "could not parse date header '{}'. (error: {})", date_text, error);
                None
            }
        }
    }

    fn add_race(open: OpenDay, row: &ElementRef) -> OpenDay {
        let (date, mut races) = match open {
            Some(day) => day,
            None => {
                debug!(target:"parsers/archive:parse", "race row outside of a date, skipping");
                return None;
            }
        };

        match ArchiveParser::parse_row(row) {
            Some(race) => races.push(race),
            None => {
                debug!(target:"parsers/archive:parse", "race row without link on {}, skipping", date);
            }
        }

        Some((date, races))
    }

    /// # parse race row
    /// read the link of a race row. the race number is the text of the first
    /// child element of the link's first child element; when there is no such
    /// grandchild the whole text of the link is used.
    fn parse_row(row: &ElementRef) -> Option<RaceRef> {
        let link = row
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == "a")?;

        let href = link.value().attr("href").unwrap_or_default().to_string();

        let grandchild = child_elements(link).next().and_then(|child| child_elements(child).next());

        let number = match grandchild {
            Some(element) => element_text(&element),
            None => element_text(&link),
        };

        Some(RaceRef { number, href })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn page(children: &str) -> String {
        format!(
            "<html><body><div class=\"archive\"><div class=\"archiveData\">{}</div></div></body></html>",
            children
        )
    }

    fn row(number: &str, href: &str) -> String {
        format!(
            "<div class=\"archiveDataRow\"><a href=\"{}\"><div class=\"cell\"><span>{}</span></div><div>12:00</div></a></div>",
            href, number
        )
    }

    fn header(date: &str) -> String {
        format!("<div class=\"archiveDateHeader\">{}</div>", date)
    }

    #[test]
    fn groups_rows_under_headers() {
        let html = page(&[
            header("01.06.2024"),
            row("1", "race.php?id=1"),
            row("2", "race.php?id=2"),
            header("02.06.2024"),
            row("3", "race.php?id=3"),
            row("4", "race.php?id=4"),
        ]
        .concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            days[0].races,
            vec![
                RaceRef { number: "1".to_string(), href: "race.php?id=1".to_string() },
                RaceRef { number: "2".to_string(), href: "race.php?id=2".to_string() },
            ]
        );
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(days[1].races[0].number, "3");
        assert_eq!(days[1].races[1].href, "race.php?id=4");
    }

    #[test]
    fn trailing_header_without_rows_is_dropped() {
        let html = page(&[
            header("01.06.2024"),
            row("1", "a"),
            row("2", "b"),
            header("02.06.2024"),
            row("3", "c"),
            row("4", "d"),
            header("03.06.2024"),
        ]
        .concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn header_without_rows_in_the_middle_is_dropped() {
        let html = page(&[header("01.06.2024"), header("02.06.2024"), row("1", "a")].concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn unparseable_header_closes_the_day() {
        let html = page(&[
            header("01.06.2024"),
            row("1", "a"),
            header("yesterday"),
            row("2", "b"),
            header("03.06.2024"),
            row("3", "c"),
        ]
        .concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].races.len(), 1);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(days[1].races[0].number, "3");
    }

    #[test]
    fn rows_before_first_header_are_ignored() {
        let html = page(&[row("0", "z"), header("01.06.2024"), row("1", "a")].concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].races.len(), 1);
        assert_eq!(days[0].races[0].number, "1");
    }

    #[test]
    fn link_text_is_used_without_grandchild() {
        let html = page(&[
            header("01.06.2024"),
            "<div class=\"archiveDataRow\"><a href=\"x\"><b>Race</b> 7</a></div>".to_string(),
            "<div class=\"archiveDataRow\"><a href=\"y\"><div><p><b>8</b></p></div></a></div>".to_string(),
        ]
        .concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(
            days[0].races,
            vec![
                RaceRef { number: "Race 7".to_string(), href: "x".to_string() },
                RaceRef { number: "8".to_string(), href: "y".to_string() },
            ]
        );
    }

    #[test]
    fn link_text_is_used_without_child_elements() {
        let html = page(&[
            header("01.06.2024"),
            "<div class=\"archiveDataRow\"><a href=\"x\"> 17 </a></div>".to_string(),
            "<div class=\"archiveDataRow\"><span>no link</span></div>".to_string(),
        ]
        .concat());

        let days = ArchiveParser::parse(&html).unwrap();
        assert_eq!(days[0].races, vec![RaceRef { number: "17".to_string(), href: "x".to_string() }]);
    }

    #[test]
    fn missing_container_is_an_error() {
        let result = ArchiveParser::parse("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(result, Err(Error::ContainerNotFoundError { .. })));
    }

    #[test]
    fn empty_container_is_no_data() {
        assert_eq!(ArchiveParser::parse(&page("")).unwrap(), Vec::new());
    }
}
