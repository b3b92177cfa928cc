//! The ordered bookstore query tour.

use std::io::Write;

use mongodb::Client;
use mongodb::bson::doc;

use crate::connection::{ConnectionManager, FindDocumentsOptions};
use crate::error::Result;
use crate::explain::ExplainSummary;
use crate::models::{
    AuthorBookCount, BookRow, BookSummary, BookstoreTarget, DecadeBucket, GenrePriceStats,
};
use crate::queries::{self, SortDirection};
use crate::report::Reporter;

/// Runs every query step in program order against one collection.
pub struct QueryRunner {
    manager: ConnectionManager,
    target: BookstoreTarget,
}

impl QueryRunner {
    pub fn new(target: BookstoreTarget) -> Result<Self> {
        Ok(Self { manager: ConnectionManager::new()?, target })
    }

    /// Run the whole tour, writing the report to `out`.
    ///
    /// The first failing step aborts the rest. The client is shut down on
    /// every path once it has been created, and the first error is returned.
    pub fn run<W: Write>(&self, out: W) -> Result<()> {
        let mut report = Reporter::new(out);

        let client = match self.manager.open_client(&self.target) {
            Ok(client) => client,
            Err(err) => {
                log::error!("Failed to create client for {}: {err}", self.target.uri);
                let _ = report.failed(&err);
                return Err(err);
            }
        };

        let outcome = self.run_steps(&client, &mut report);
        if let Err(err) = &outcome {
            log::error!("Query tour aborted: {err}");
            // The report itself may be what failed; the original error still wins.
            let _ = report.failed(err);
        }

        self.manager.disconnect(client);
        let closed = report.closed();
        outcome.and(closed)
    }

    fn run_steps<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        self.manager.ping(client)?;
        log::info!("Connected to {} for {}", self.target.uri, self.target.namespace());
        report.connected()?;

        report.section("TASK 2: BASIC CRUD OPERATIONS")?;
        self.find_by_genre(client, report)?;
        self.find_published_after(client, report)?;
        self.find_by_author(client, report)?;
        self.update_price(client, report)?;
        self.delete_by_title(client, report)?;

        report.section("TASK 3: ADVANCED QUERIES")?;
        self.find_in_stock_recent(client, report)?;
        self.project_summaries(client, report)?;
        self.sort_by_price(client, report)?;
        self.paginate(client, report)?;

        report.section("TASK 4: AGGREGATION PIPELINE")?;
        self.average_price_by_genre(client, report)?;
        self.author_with_most_books(client, report)?;
        self.books_by_decade(client, report)?;

        report.section("TASK 5: INDEXING")?;
        self.create_indexes(client, report)?;
        self.list_indexes(client, report)?;
        self.explain_title_lookup(client, report)?;

        report.completed()
    }

    fn find_books(&self, client: &Client, opts: FindDocumentsOptions) -> Result<Vec<BookRow>> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        self.manager.find_documents(client, database, collection, opts)
    }

    fn find_by_genre<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        report.step(1, &format!("Find all books in \"{}\" genre:", queries::FICTION_GENRE))?;
        let books = self.find_books(
            client,
            FindDocumentsOptions::filtered(queries::by_genre(queries::FICTION_GENRE)),
        )?;
        log::debug!("genre filter matched {} documents", books.len());
        report.books_by_author(&books)
    }

    fn find_published_after<W: Write>(
        &self,
        client: &Client,
        report: &mut Reporter<W>,
    ) -> Result<()> {
        let year = queries::RECENT_YEAR_THRESHOLD;
        report.step(2, &format!("Find books published after {year}:"))?;
        let filter = queries::published_after(year);
        let books = self.find_books(client, FindDocumentsOptions::filtered(filter))?;
        log::debug!("year range filter matched {} documents", books.len());
        report.books_with_year(&books)
    }

    fn find_by_author<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        report.step(3, &format!("Find books by {}:", queries::FEATURED_AUTHOR))?;
        let books = self.find_books(
            client,
            FindDocumentsOptions::filtered(queries::by_author(queries::FEATURED_AUTHOR)),
        )?;
        log::debug!("author filter matched {} documents", books.len());
        report.books_with_year(&books)
    }

    fn update_price<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        let title = queries::REPRICED_TITLE;
        report.step(4, &format!("Update the price of \"{title}\" to ${}:", queries::NEW_PRICE))?;

        let result = self.manager.update_one(
            client,
            database,
            collection,
            queries::by_title(title),
            queries::set_price(queries::NEW_PRICE),
        )?;
        if result.modified_count == 0 {
            log::warn!("Price update for {title:?} modified nothing");
        }

        let current: Option<BookRow> =
            self.manager.find_one(client, database, collection, queries::by_title(title))?;
        report.price_update(result.modified_count, title, current.as_ref())
    }

    fn delete_by_title<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        let title = queries::REMOVED_TITLE;
        report.step(5, &format!("Delete \"{title}\" from the collection:"))?;

        let result =
            self.manager.delete_one(client, database, collection, queries::by_title(title))?;
        if result.deleted_count == 0 {
            log::warn!("Delete of {title:?} removed nothing");
        }

        let remaining = self.manager.count_documents(client, database, collection, doc! {})?;
        report.deletion(result.deleted_count, remaining)
    }

    fn find_in_stock_recent<W: Write>(
        &self,
        client: &Client,
        report: &mut Reporter<W>,
    ) -> Result<()> {
        let year = queries::MODERN_YEAR_THRESHOLD;
        report.step(1, &format!("Books in stock AND published after {year}:"))?;
        let books = self.find_books(
            client,
            FindDocumentsOptions::filtered(queries::in_stock_published_after(year)),
        )?;
        report.books_with_year(&books)
    }

    fn project_summaries<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        report.step(2, "Books with ONLY title, author, and price (projection):")?;
        let rows: Vec<BookSummary> =
            self.manager.find_documents(client, database, collection, queries::summary_preview())?;
        report.projected(&rows)
    }

    fn sort_by_price<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        report.step(3, "Books sorted by price (ASCENDING - cheapest first):")?;
        let ascending = self.find_books(
            client,
            queries::sorted_by_price(SortDirection::Ascending, queries::PREVIEW_LIMIT),
        )?;
        report.priced(&ascending)?;

        report.line("Books sorted by price (DESCENDING - most expensive first):")?;
        let descending = self.find_books(
            client,
            queries::sorted_by_price(SortDirection::Descending, queries::PREVIEW_LIMIT),
        )?;
        report.priced(&descending)
    }

    fn paginate<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let page_size = queries::PAGE_SIZE;
        report.step(4, &format!("Pagination ({page_size} books per page, natural order):"))?;
        for page in 1..=queries::PAGES_SHOWN {
            let books = self.find_books(client, queries::page_options(page, page_size, None))?;
            report.page(page, &books)?;
        }
        Ok(())
    }

    fn average_price_by_genre<W: Write>(
        &self,
        client: &Client,
        report: &mut Reporter<W>,
    ) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        report.step(1, "Average price of books by genre:")?;
        let groups: Vec<GenrePriceStats> = self.manager.aggregate_as(
            client,
            database,
            collection,
            queries::average_price_by_genre(),
        )?;
        report.genre_prices(&groups)
    }

    fn author_with_most_books<W: Write>(
        &self,
        client: &Client,
        report: &mut Reporter<W>,
    ) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        report.step(2, "Author with the most books:")?;
        let top: Vec<AuthorBookCount> = self.manager.aggregate_as(
            client,
            database,
            collection,
            queries::author_with_most_books(),
        )?;
        report.top_author(top.first())
    }

    fn books_by_decade<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        report.step(3, "Books grouped by publication decade:")?;
        let buckets: Vec<DecadeBucket> =
            self.manager.aggregate_as(client, database, collection, queries::books_by_decade())?;
        report.decades(&buckets)
    }

    fn create_indexes<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;

        report.step(1, "Creating index on \"title\" field:")?;
        let name = self.manager.create_index(client, database, collection, queries::title_index())?;
        log::debug!("created index {name}");
        report.index_created(&name)?;

        report.step(2, "Creating compound index on \"author\" and \"published_year\":")?;
        let name =
            self.manager.create_index(client, database, collection, queries::author_year_index())?;
        log::debug!("created index {name}");
        report.index_created(&name)
    }

    fn list_indexes<W: Write>(&self, client: &Client, report: &mut Reporter<W>) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        report.step(3, "All indexes in the collection:")?;
        let indexes = self.manager.list_indexes(client, database, collection)?;
        report.indexes(&indexes)
    }

    fn explain_title_lookup<W: Write>(
        &self,
        client: &Client,
        report: &mut Reporter<W>,
    ) -> Result<()> {
        let BookstoreTarget { database, collection, .. } = &self.target;
        let title = queries::EXPLAINED_TITLE;
        report.step(4, "Performance analysis using explain():")?;
        report.line(&format!("Query: Find book by title \"{title}\""))?;

        let explain =
            self.manager.explain_find(client, database, collection, queries::by_title(title))?;
        report.explain(&ExplainSummary::from_document(&explain))
    }
}
