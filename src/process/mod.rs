//! Extraction core: locates report rows inside the quote page markup and
//! turns them into raw string tables for the reshape step.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::error::{Result, ScrapeError};

pub mod convert;
pub mod reshape;
pub mod table;

pub use table::{ColumnId, RawTable, Table, Value};

/// Rows with at least this many missing cells are treated as structural
/// noise (section headers, ad rows) and dropped. Observed behaviour of the
/// page layout, not derived from a column-count invariant, so it is a
/// policy parameter overridable from the CLI.
pub const DEFAULT_MISSING_TOLERANCE: usize = 4;

// Statement pages render their table as nested divs; the row class and the
// summary cell classes are Yahoo's atomic-CSS names and are the part most
// likely to need updating when the layout drifts.
const STATEMENT_ROW_SELECTOR: &str = r#"div[class*="D(tbr)"]"#;
const SUMMARY_ROW_SELECTOR: &str = r#"div[data-test*="summary-table"] tr"#;
const SUMMARY_KEY_SELECTOR: &str = r#"td[class*="C($primaryColor)"]"#;
const SUMMARY_VALUE_SELECTOR: &str = r#"td[class*="Ta(end)"]"#;
const PRICE_SELECTOR: &str = "#quote-header-info > div:nth-of-type(3) > div > span";
const CHANGE_SELECTOR: &str = "#quote-header-info > div:nth-of-type(3) > div > div > span";
const NOTICE_SELECTOR: &str = "#quote-header-info > div:nth-of-type(3) > div > div > div > span";

/// Extract the statement table rows from a financials / balance-sheet /
/// cash-flow page.
///
/// Each row's cells are its direct child divs; a cell's value is the single
/// text token of a descendant span. Ambiguous cells (zero or several
/// tokens) become missing markers, and a row with `tolerance` or more
/// missing cells is dropped entirely.
pub fn extract_statement_rows(doc: &Html, tolerance: usize) -> Result<RawTable> {
    let row_sel = Selector::parse(STATEMENT_ROW_SELECTOR).expect("row selector should be valid");
    let span_sel = Selector::parse("span").expect("span selector should be valid");

    let mut rows = Vec::new();
    for row in doc.select(&row_sel) {
        let mut cells: Vec<Option<String>> = Vec::new();
        let mut missing = 0usize;
        for cell in child_divs(row) {
            match single_span_text(cell, &span_sel) {
                Some(text) => cells.push(Some(text)),
                None => {
                    cells.push(None);
                    missing += 1;
                }
            }
        }
        if missing < tolerance {
            rows.push(cells);
        } else {
            trace!(missing, "dropping mostly-missing row");
        }
    }

    if rows.is_empty() {
        return Err(ScrapeError::EmptyExtraction);
    }
    debug!(rows = rows.len(), "extracted statement rows");
    Ok(RawTable { rows })
}

/// Everything pulled off a summary page: the discovered label/value listing
/// in source order, plus the three quote-header scalars that become
/// synthesized fields.
#[derive(Debug)]
pub struct SummaryPage {
    pub pairs: Vec<(String, String)>,
    pub price: String,
    pub change: String,
    pub market_notice: String,
}

/// Extract the key/value listing and quote-header scalars from a summary
/// page. Labels and values are the trimmed concatenation of every text
/// token under their cell, since Yahoo splits some field text across
/// nested elements.
pub fn extract_summary(doc: &Html) -> Result<SummaryPage> {
    let row_sel =
        Selector::parse(SUMMARY_ROW_SELECTOR).expect("summary row selector should be valid");
    let key_sel =
        Selector::parse(SUMMARY_KEY_SELECTOR).expect("summary key selector should be valid");
    let val_sel =
        Selector::parse(SUMMARY_VALUE_SELECTOR).expect("summary value selector should be valid");

    let mut pairs = Vec::new();
    for row in doc.select(&row_sel) {
        let key = joined_text(row, &key_sel);
        let value = joined_text(row, &val_sel);
        pairs.push((key, value));
    }
    if pairs.is_empty() {
        return Err(ScrapeError::EmptyExtraction);
    }
    debug!(fields = pairs.len(), "extracted summary listing");

    Ok(SummaryPage {
        pairs,
        price: header_text(doc, PRICE_SELECTOR),
        change: header_text(doc, CHANGE_SELECTOR),
        market_notice: header_text(doc, NOTICE_SELECTOR),
    })
}

/// Page `<h1>` text, printed above plain-text output.
pub fn page_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse("h1").expect("h1 selector should be valid");
    let title: String = doc.select(&sel).next()?.text().collect::<String>().trim().to_string();
    (!title.is_empty()).then_some(title)
}

fn child_divs(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "div")
}

/// Exactly one descendant span with a leading text node, or the cell is
/// ambiguous and counts as missing.
fn single_span_text(cell: ElementRef<'_>, span_sel: &Selector) -> Option<String> {
    let mut tokens = cell.select(span_sel).filter_map(first_text);
    let first = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(first)
}

fn first_text(span: ElementRef<'_>) -> Option<String> {
    span.children()
        .find_map(|n| n.value().as_text().map(|t| t.to_string()))
}

fn joined_text(scope: ElementRef<'_>, sel: &Selector) -> String {
    scope
        .select(sel)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn header_text(doc: &Html, selector: &str) -> String {
    let sel = Selector::parse(selector).expect("quote header selector should be valid");
    doc.select(&sel)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement_row(cells: &[Option<&str>]) -> String {
        let mut row = String::from(r#"<div class="D(tbr) C($primaryColor)">"#);
        for cell in cells {
            match cell {
                Some(text) => row.push_str(&format!("<div><span>{text}</span></div>")),
                None => row.push_str("<div></div>"),
            }
        }
        row.push_str("</div>");
        row
    }

    #[test]
    fn extracts_rows_and_marks_ambiguous_cells_missing() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            statement_row(&[Some("Breakdown"), Some("2021"), Some("2020")]),
            statement_row(&[Some("Total Revenue"), Some("1,000"), Some("900")]),
        );
        let doc = Html::parse_document(&html);
        let raw = extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE).unwrap();

        assert_eq!(raw.rows.len(), 2);
        assert_eq!(
            raw.rows[0],
            vec![
                Some("Breakdown".to_string()),
                Some("2021".to_string()),
                Some("2020".to_string())
            ]
        );
    }

    #[test]
    fn cell_with_multiple_spans_is_ambiguous() {
        let html = r#"<html><body><div class="D(tbr)">
            <div><span>Label</span></div>
            <div><span>1</span><span>2</span></div>
            <div><span><b>no leading text</b></span></div>
        </div></body></html>"#;
        let doc = Html::parse_document(html);
        let raw = extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE).unwrap();

        assert_eq!(
            raw.rows[0],
            vec![Some("Label".to_string()), None, None]
        );
    }

    #[test]
    fn row_at_tolerance_is_dropped_row_below_survives() {
        // 4 missing of 5 → dropped; 2 missing of 5 → kept with markers.
        let html = format!(
            "<html><body>{}{}</body></html>",
            statement_row(&[None, None, None, None, Some("ad")]),
            statement_row(&[Some("Gross Profit"), None, None, Some("10"), Some("20")]),
        );
        let doc = Html::parse_document(&html);
        let raw = extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE).unwrap();

        assert_eq!(raw.rows.len(), 1);
        assert_eq!(
            raw.rows[0],
            vec![
                Some("Gross Profit".to_string()),
                None,
                None,
                Some("10".to_string()),
                Some("20".to_string())
            ]
        );
    }

    #[test]
    fn exactly_three_missing_survives() {
        let html = format!(
            "<html><body>{}</body></html>",
            statement_row(&[Some("Metric"), None, None, None, Some("5")]),
        );
        let doc = Html::parse_document(&html);
        let raw = extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE).unwrap();
        assert_eq!(raw.rows.len(), 1);
    }

    #[test]
    fn no_rows_is_empty_extraction() {
        let doc = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(
            extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE),
            Err(ScrapeError::EmptyExtraction)
        ));
    }

    #[test]
    fn summary_page_yields_pairs_and_header_scalars() {
        let html = r#"<html><body>
          <div id="quote-header-info">
            <div></div>
            <div></div>
            <div>
              <div>
                <span>123.45</span>
                <div>
                  <span>+1.23 (+1.01%)</span>
                  <div><span>Market open</span></div>
                </div>
              </div>
            </div>
          </div>
          <div data-test="quote-summary-table">
            <table><tbody>
              <tr>
                <td class="C($primaryColor) W(51%)">Market <span>Cap</span></td>
                <td class="Ta(end) Fw(600)">500B</td>
              </tr>
              <tr>
                <td class="C($primaryColor)">PE Ratio</td>
                <td class="Ta(end)">30.01</td>
              </tr>
            </tbody></table>
          </div>
        </body></html>"#;
        let doc = Html::parse_document(html);
        let page = extract_summary(&doc).unwrap();

        assert_eq!(
            page.pairs,
            vec![
                ("Market Cap".to_string(), "500B".to_string()),
                ("PE Ratio".to_string(), "30.01".to_string()),
            ]
        );
        assert_eq!(page.price, "123.45");
        assert!(page.change.contains("+1.23"));
        assert!(page.market_notice.contains("Market open"));
    }

    #[test]
    fn summary_without_listing_is_empty_extraction() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert!(matches!(
            extract_summary(&doc),
            Err(ScrapeError::EmptyExtraction)
        ));
    }

    #[test]
    fn statement_page_end_to_end_with_coercion() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            statement_row(&[Some("Breakdown"), Some("2021"), Some("2020")]),
            statement_row(&[Some("Total Revenue"), Some("1,000"), Some("900")]),
        );
        let doc = Html::parse_document(&html);
        let raw = extract_statement_rows(&doc, DEFAULT_MISSING_TOLERANCE).unwrap();
        let mut table = reshape::reshape_statement(raw);
        convert::coerce_numeric(&mut table).unwrap();

        assert_eq!(
            table.columns,
            table::assign_identities(["Date", "Total Revenue"])
        );
        assert_eq!(
            table.rows,
            vec![
                vec![Value::Text("2021".into()), Value::Number(1000.0)],
                vec![Value::Text("2020".into()), Value::Number(900.0)],
            ]
        );
    }

    #[test]
    fn title_comes_from_first_h1() {
        let doc = Html::parse_document("<html><body><h1>Apple Inc. (AAPL)</h1></body></html>");
        assert_eq!(page_title(&doc).as_deref(), Some("Apple Inc. (AAPL)"));
        let empty = Html::parse_document("<html><body></body></html>");
        assert_eq!(page_title(&empty), None);
    }
}
