use crate::ledger::Row;
use anyhow::{anyhow, Context, Result};
use derive_builder::Builder;
use log::{error, info};
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_URL: &str = "https://candystore.zimpler.net";
pub const DEFAULT_ROW_SELECTOR: &str = "#top\\.customers tbody tr";

/// Scrapes the customer table of a single page into rows.
#[derive(Debug, Clone, Builder)]
pub struct SnackScraper {
    #[builder(setter(into), default = "DEFAULT_URL.to_string()")]
    url: String,
    #[builder(setter(into), default = "DEFAULT_ROW_SELECTOR.to_string()")]
    selector: String,
}

impl SnackScraper {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<String> {
        info!("Visiting {}", self.url);
        let html = reqwest::get(&self.url)
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }

    /// Fetches the page and parses its rows. A failed fetch is reported and
    /// yields no rows; a malformed row is still an error.
    pub async fn scrape(&self) -> Result<Vec<Row>> {
        match self.fetch().await {
            Ok(html) => self.parse(&html),
            Err(e) => {
                error!("Error: {:#}", e);
                Ok(vec![])
            }
        }
    }

    pub fn parse(&self, html: &str) -> Result<Vec<Row>> {
        let document = Html::parse_document(html);
        let rows = Selector::parse(&self.selector)
            .map_err(|e| anyhow!("Invalid row selector {:?}: {}", self.selector, e))?;

        let name = Selector::parse("td:nth-child(1)").unwrap();
        let snack = Selector::parse("td:nth-child(2)").unwrap();
        let amount = Selector::parse("td:nth-child(3)").unwrap();

        document
            .select(&rows)
            .enumerate()
            .map(|(idx, row)| {
                Row::from_cells(
                    &child_text(&row, &name),
                    &child_text(&row, &snack),
                    &child_text(&row, &amount),
                )
                .with_context(|| format!("Bad customer row #{}", idx + 1))
            })
            .collect()
    }
}

fn child_text(row: &ElementRef, selector: &Selector) -> String {
    row.select(selector).flat_map(|node| node.text()).collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{accumulate, reduce};

    fn default_scraper() -> SnackScraper {
        SnackScraperBuilder::default().build().unwrap()
    }

    #[test]
    fn builder_should_use_defaults() {
        let scraper = default_scraper();
        assert_eq!(scraper.url(), DEFAULT_URL);
        assert_eq!(scraper.selector, DEFAULT_ROW_SELECTOR);

        let scraper = SnackScraperBuilder::default()
            .url("http://localhost:8080")
            .build()
            .unwrap();
        assert_eq!(scraper.url(), "http://localhost:8080");
    }

    #[test]
    fn parse_html_should_work() {
        let content = fs::read_to_string("fixtures/candystore.html").unwrap();
        let rows = default_scraper().parse(&content).unwrap();

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], Row::new("Annika", "Geisha", 100));
        assert_eq!(rows[2], Row::new("Jane", "Nötchoklad", 22));
        assert_eq!(rows[3], Row::new("Annika", "Pätchoklad", 70));
    }

    #[test]
    fn scraped_rows_should_summarize() {
        let content = fs::read_to_string("fixtures/candystore.html").unwrap();
        let ledger = accumulate(default_scraper().parse(&content).unwrap()).unwrap();
        let summaries = reduce(ledger.customers());

        let got: Vec<_> = summaries
            .iter()
            .map(|s| (s.name.as_str(), s.favorite_snack.as_str(), s.total_snacks))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Annika", "Geisha", 100),
                ("Jonas", "Geisha", 201),
                ("Jane", "Extra Starkt", 40),
            ]
        );
    }

    #[test]
    fn malformed_amount_should_fail() {
        let content = fs::read_to_string("fixtures/malformed.html").unwrap();
        let err = default_scraper().parse(&content).unwrap_err();

        assert!(format!("{:#}", err).contains("Parsing snack amount"));
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn page_without_table_has_no_rows() {
        let rows = default_scraper()
            .parse("<html><body><p>closed</p></body></html>")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn invalid_selector_should_fail() {
        let scraper = SnackScraperBuilder::default()
            .selector("tr[")
            .build()
            .unwrap();
        assert!(scraper.parse("<table></table>").is_err());
    }

    #[tokio::test]
    async fn unreachable_page_is_not_fatal() {
        let scraper = SnackScraperBuilder::default()
            .url("http://127.0.0.1:1")
            .build()
            .unwrap();
        assert!(scraper.fetch().await.is_err());
        assert!(scraper.scrape().await.unwrap().is_empty());
    }
}
