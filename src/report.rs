//! Human-readable console report for the query tour.

use std::io::Write;

use mongodb::bson::{Bson, Document};

use crate::error::Result;
use crate::explain::ExplainSummary;
use crate::models::{
    AuthorBookCount, BookRow, BookSummary, DecadeBucket, GenrePriceStats, IndexSummary,
};

/// Printed in place of a field the document does not carry.
const MISSING: &str = "n/a";

/// Writes each step's results as indented plain text.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn connected(&mut self) -> Result<()> {
        writeln!(self.out, "Connected to MongoDB\n")?;
        Ok(())
    }

    pub fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n== {title} ==\n")?;
        Ok(())
    }

    pub fn step(&mut self, number: u32, label: &str) -> Result<()> {
        writeln!(self.out, "{number}. {label}")?;
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "   {text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// `Found N books:` followed by `title by author` rows.
    pub fn books_by_author(&mut self, books: &[BookRow]) -> Result<()> {
        self.found(books.len())?;
        for book in books {
            writeln!(self.out, "   - {} by {}", text(&book.title), text(&book.author))?;
        }
        self.blank()
    }

    /// `Found N books:` followed by `title (year)` rows.
    pub fn books_with_year(&mut self, books: &[BookRow]) -> Result<()> {
        self.found(books.len())?;
        for book in books {
            writeln!(self.out, "   - {} ({})", text(&book.title), shown(book.published_year))?;
        }
        self.blank()
    }

    fn found(&mut self, count: usize) -> Result<()> {
        writeln!(self.out, "   Found {count} books:")?;
        Ok(())
    }

    pub fn price_update(
        &mut self,
        modified: u64,
        title: &str,
        current: Option<&BookRow>,
    ) -> Result<()> {
        writeln!(self.out, "   Modified {modified} document(s)")?;
        match current {
            Some(book) => writeln!(self.out, "   New price: {}", price(book.price))?,
            None => writeln!(self.out, "   No book titled \"{title}\" to show")?,
        }
        self.blank()
    }

    pub fn deletion(&mut self, deleted: u64, remaining: u64) -> Result<()> {
        writeln!(self.out, "   Deleted {deleted} document(s)")?;
        writeln!(self.out, "   Books remaining in collection: {remaining}")?;
        self.blank()
    }

    pub fn projected(&mut self, rows: &[BookSummary]) -> Result<()> {
        writeln!(self.out, "   First {} books:", rows.len())?;
        for row in rows {
            writeln!(
                self.out,
                "   - \"{}\" by {} - {}",
                text(&row.title),
                text(&row.author),
                price(row.price)
            )?;
        }
        self.blank()
    }

    pub fn priced(&mut self, books: &[BookRow]) -> Result<()> {
        for book in books {
            writeln!(self.out, "   - {}: {}", text(&book.title), price(book.price))?;
        }
        self.blank()
    }

    pub fn page(&mut self, page: u64, books: &[BookRow]) -> Result<()> {
        writeln!(self.out, "   Page {page}:")?;
        for book in books {
            writeln!(self.out, "   - {}", text(&book.title))?;
        }
        self.blank()
    }

    pub fn genre_prices(&mut self, groups: &[GenrePriceStats]) -> Result<()> {
        for group in groups {
            let average = match group.average_price {
                Some(avg) => format!("${avg:.2}"),
                None => MISSING.to_string(),
            };
            writeln!(
                self.out,
                "   - {}: {} ({} books)",
                text(&group.genre),
                average,
                group.count
            )?;
        }
        self.blank()
    }

    pub fn top_author(&mut self, top: Option<&AuthorBookCount>) -> Result<()> {
        if let Some(top) = top {
            writeln!(self.out, "   - {}: {} books", text(&top.author), top.book_count)?;
            let titles: Vec<&str> = top.titles.iter().map(text).collect();
            writeln!(self.out, "   Books: {}", titles.join(", "))?;
        }
        self.blank()
    }

    pub fn decades(&mut self, buckets: &[DecadeBucket]) -> Result<()> {
        for bucket in buckets {
            let decade = match bucket.decade {
                Some(decade) => format!("{decade}s"),
                None => MISSING.to_string(),
            };
            writeln!(self.out, "   - {decade}: {} books", bucket.count)?;
            for title in &bucket.books {
                writeln!(self.out, "     * {}", text(title))?;
            }
        }
        self.blank()
    }

    pub fn index_created(&mut self, name: &str) -> Result<()> {
        writeln!(self.out, "   Index {name} created")?;
        self.blank()
    }

    pub fn indexes(&mut self, indexes: &[IndexSummary]) -> Result<()> {
        for index in indexes {
            writeln!(self.out, "   - {}: {}", index.name, key_spec_json(&index.keys)?)?;
        }
        self.blank()
    }

    pub fn explain(&mut self, summary: &ExplainSummary) -> Result<()> {
        writeln!(self.out, "   - Execution time: {}ms", display_count(summary.execution_time_ms))?;
        writeln!(self.out, "   - Documents examined: {}", display_count(summary.docs_examined))?;
        writeln!(self.out, "   - Documents returned: {}", display_count(summary.n_returned))?;
        writeln!(self.out, "   - Index used: {}", summary.index_label())?;
        self.blank()
    }

    pub fn completed(&mut self) -> Result<()> {
        writeln!(self.out, "\nAll queries completed successfully!\n")?;
        Ok(())
    }

    pub fn failed(&mut self, err: &dyn std::fmt::Display) -> Result<()> {
        writeln!(self.out, "Error occurred: {err}")?;
        Ok(())
    }

    pub fn closed(&mut self) -> Result<()> {
        writeln!(self.out, "Connection closed")?;
        self.out.flush()?;
        Ok(())
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

fn shown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

fn price(value: Option<f64>) -> String {
    value.map(|v| format!("${v}")).unwrap_or_else(|| MISSING.to_string())
}

fn display_count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Compact relaxed extended JSON for an index key spec, keeping key order.
pub fn key_spec_json(keys: &Document) -> Result<String> {
    let mut parts = Vec::with_capacity(keys.len());
    for (key, value) in keys {
        let value = Bson::into_relaxed_extjson(value.clone());
        parts.push(format!("{}:{}", serde_json::to_string(key)?, serde_json::to_string(&value)?));
    }
    Ok(format!("{{{}}}", parts.join(",")))
}
