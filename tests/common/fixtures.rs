//! Bookstore fixture data.

#![allow(dead_code)]

use bookstore_queries::models::Book;

fn book(title: &str, author: &str, genre: &str, year: i32, price: f64, in_stock: bool) -> Book {
    Book {
        id: None,
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        published_year: year,
        price,
        in_stock,
    }
}

/// Twelve books with unique prices and a single author holding the most titles.
pub fn bookstore() -> Vec<Book> {
    vec![
        book("1984", "George Orwell", "Fiction", 1949, 9.99, true),
        book("Animal Farm", "George Orwell", "Fiction", 1945, 7.99, true),
        book("To Kill a Mockingbird", "Harper Lee", "Fiction", 1960, 12.99, true),
        book("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1925, 11.49, false),
        book("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1937, 14.99, true),
        book("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", 1954, 19.99, true),
        book("The Silmarillion", "J.R.R. Tolkien", "Fantasy", 1977, 16.49, false),
        book("Dune", "Frank Herbert", "Science Fiction", 1965, 18.25, true),
        book("The Martian", "Andy Weir", "Science Fiction", 2011, 15.75, true),
        book("Project Hail Mary", "Andy Weir", "Science Fiction", 2021, 17.5, false),
        book("Sapiens", "Yuval Noah Harari", "Non-Fiction", 2011, 21.0, true),
        book("Educated", "Tara Westover", "Memoir", 2018, 13.25, true),
    ]
}

/// The two Orwell titles used by the end-to-end scenario.
pub fn orwell_pair() -> Vec<Book> {
    bookstore().into_iter().filter(|b| b.author == "George Orwell").collect()
}
