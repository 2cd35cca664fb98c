use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::process::utils::clean_str;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header cell text, left to right. Empty when the table has no header.
    pub headers: Vec<String>,
    /// Body rows that produced at least one cell.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Append a synthetic column to the headers and every row in lock-step.
    /// Rows are first padded or cut to the header width so the new column lines up.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(ScrapeError::MalformedField {
                field: name.to_string(),
                value: Some(format!(
                    "{} values for {} rows",
                    values.len(),
                    self.rows.len()
                )),
            });
        }
        let width = self.headers.len();
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.resize(width, String::new());
            row.push(value);
        }
        Ok(())
    }
}

/// Where a table and its parts live on a page.
#[derive(Debug, Clone)]
pub struct TableLocator {
    pub table: String,
    /// Which match of `table` to use.
    pub index: usize,
    pub header: Option<String>,
    pub row: String,
    pub cell: String,
    /// Image inside a row whose `src` is collected alongside it.
    pub image: Option<String>,
}

impl TableLocator {
    /// `thead th` headers, `tbody tr` rows, `td` cells.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            index: 0,
            header: Some("thead th".to_string()),
            row: "tbody tr".to_string(),
            cell: "td".to_string(),
            image: None,
        }
    }

    /// Headerless table picked by position, e.g. the third `.frame_space`.
    pub fn nth(table: &str, index: usize) -> Self {
        Self {
            table: table.to_string(),
            index,
            header: None,
            row: "tr".to_string(),
            cell: "td".to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, selector: &str) -> Self {
        self.image = Some(selector.to_string());
        self
    }
}

/// A table plus, per kept row, the resolved image URL if the row had one.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub table: RawTable,
    pub images: Vec<Option<String>>,
}

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector(selector.to_string()))
}

fn text_of(el: ElementRef<'_>) -> String {
    clean_str(&el.text().collect::<String>())
}

/// Extract the located table from `html`. `page_url` resolves relative image links.
pub fn extract(html: &str, page_url: &str, locator: &TableLocator) -> Result<Extraction> {
    let table_sel = parse_selector(&locator.table)?;
    let header_sel = locator.header.as_deref().map(parse_selector).transpose()?;
    let row_sel = parse_selector(&locator.row)?;
    let cell_sel = parse_selector(&locator.cell)?;
    let image_sel = locator.image.as_deref().map(parse_selector).transpose()?;
    let base = Url::parse(page_url).ok();

    let doc = Html::parse_document(html);
    let table = doc
        .select(&table_sel)
        .nth(locator.index)
        .ok_or_else(|| ScrapeError::ElementNotFound {
            selector: format!("{} [{}]", locator.table, locator.index),
            url: page_url.to_string(),
        })?;

    let headers: Vec<String> = header_sel
        .as_ref()
        .map(|sel| table.select(sel).map(text_of).collect())
        .unwrap_or_default();
    debug!(?headers, "table headers");

    let mut out = Extraction {
        table: RawTable {
            headers,
            rows: Vec::new(),
        },
        images: Vec::new(),
    };

    for row in table.select(&row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(text_of).collect();
        if cells.is_empty() {
            continue;
        }

        if let Some(sel) = &image_sel {
            let src = row
                .select(sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(|src| resolve(base.as_ref(), src));
            if src.is_none() {
                warn!(row = ?cells, "no image in row");
            }
            out.images.push(src);
        }
        out.table.rows.push(cells);
    }

    debug!(rows = out.table.rows.len(), url = page_url, "extracted table");
    Ok(out)
}

fn resolve(base: Option<&Url>, src: &str) -> String {
    base.and_then(|b| b.join(src).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| src.to_string())
}
