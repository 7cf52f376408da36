use scraper::Html;
use snafu::OptionExt;

use crate::errors::{CustomResult, TableNotFoundSnafu};
use crate::modules::helpers::html::{first_text, selector};
use crate::modules::models::cart::CartSummary;

pub const RESULTS_TABLE: &str = "#resultsTable";
pub const DATA_ROW: &str = ".dataRow";
pub const NUMBER_CELL: &str = "#num";
pub const BEST_LAP_CELL: &str = "#best_lap_time";
pub const POSITION_CELL: &str = "#pos";

pub struct RaceResultsParser {}

impl RaceResultsParser {
    /// # parse results table
    /// read the cart summaries from the results table of a race page.
    /// a row that misses a cell gets an empty value for it.
    ///
    /// ## Arguments
    /// * `html` - the race page
    ///
    /// ## Returns
    /// * `Vec<CartSummary>` - the rows in finishing order
    pub fn parse(html: &str) -> CustomResult<Vec<CartSummary>> {
        let document = Html::parse_document(html);
        let table_selector = selector(RESULTS_TABLE)?;
        let row_selector = selector(DATA_ROW)?;
        let number_selector = selector(NUMBER_CELL)?;
        let best_lap_selector = selector(BEST_LAP_CELL)?;
        let position_selector = selector(POSITION_CELL)?;

        let table = document
            .select(&table_selector)
            .next()
            .context(TableNotFoundSnafu { selector: RESULTS_TABLE })?;

        let carts = table
            .select(&row_selector)
            .map(|row| CartSummary {
                number: first_text(&row, &number_selector),
                best_lap: first_text(&row, &best_lap_selector),
                position: first_text(&row, &position_selector),
            })
            .collect();

        Ok(carts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    const PAGE: &str = r#"
        <html><body>
        <table id="resultsTable">
            <tr class="headerRow"><td>Pos</td><td>Cart</td><td>Best</td></tr>
            <tr class="dataRow"><td id="pos">1</td><td id="num"> 12 </td><td id="best_lap_time">0:59.870</td></tr>
            <tr class="dataRow"><td id="pos">2</td><td id="num">7</td><td id="best_lap_time">1:00.012</td></tr>
            <tr class="dataRow"><td id="pos">3</td><td id="num">3</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn reads_rows_in_order() {
        let carts = RaceResultsParser::parse(PAGE).unwrap();
        assert_eq!(carts.len(), 3);
        assert_eq!(
            carts[0],
            CartSummary {
                number: "12".to_string(),
                best_lap: "0:59.870".to_string(),
                position: "1".to_string(),
            }
        );
        assert_eq!(carts[1].number, "7");
        assert_eq!(carts[1].position, "2");
    }

    #[test]
    fn missing_cell_is_empty() {
        let carts = RaceResultsParser::parse(PAGE).unwrap();
        assert_eq!(carts[2].number, "3");
        assert_eq!(carts[2].best_lap, "");
    }

    #[test]
    fn missing_table_is_an_error() {
        let result = RaceResultsParser::parse("<html><body><table id=\"other\"></table></body></html>");
        assert!(matches!(result, Err(Error::TableNotFoundError { .. })));
    }

    #[test]
    fn table_without_rows_is_no_data() {
        let carts = RaceResultsParser::parse("<table id=\"resultsTable\"><tr><td>-</td></tr></table>").unwrap();
        assert!(carts.is_empty());
    }
}
