use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::error;
use lms_flatfile::catalog::domain::CatalogService;
use lms_flatfile::catalog::factory::create_catalog_service;
use lms_flatfile::core::domain::Configuration;
use lms_flatfile::core::library::{LibraryResult, ReturnOutcome};
use lms_flatfile::utils::logs::setup_tracing;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Library catalog, membership and loans kept in flat text files")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding books.txt, members.txt and loans.txt
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a book, or more copies of a known ISBN
    AddBook {
        #[arg(value_parser = non_empty)]
        isbn: String,
        #[arg(value_parser = non_empty)]
        title: String,
        #[arg(value_parser = non_empty)]
        author: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Register a member
    AddMember {
        #[arg(value_parser = non_empty)]
        member_id: String,
        #[arg(value_parser = non_empty)]
        name: String,
        #[arg(value_parser = non_empty)]
        contact: String,
    },
    /// Lend a copy of a book to a member
    Issue {
        #[arg(value_parser = non_empty)]
        isbn: String,
        #[arg(value_parser = non_empty)]
        member_id: String,
        /// Loan period in days, defaults to the configured loan period
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
    },
    /// Return a borrowed book and report any late fine
    Return {
        #[arg(value_parser = non_empty)]
        isbn: String,
        #[arg(value_parser = non_empty)]
        member_id: String,
    },
    /// Search books by title or author keyword
    Search {
        #[arg(long, value_parser = non_empty, conflicts_with = "author", required_unless_present = "author")]
        title: Option<String>,
        #[arg(long, value_parser = non_empty)]
        author: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Check whether a copy of a book can be issued
    Available {
        #[arg(value_parser = non_empty)]
        isbn: String,
    },
    /// List all books
    Books {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List all members
    Members {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List all loans
    Loans {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List active loans past their due date
    Overdue {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn non_empty(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("value cannot be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.json);

    let mut config = match Configuration::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let mut svc = create_catalog_service(&config);
    match run(svc.as_mut(), &config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(svc: &mut dyn CatalogService, config: &Configuration, command: Command) -> LibraryResult<()> {
    match command {
        Command::AddBook { isbn, title, author, quantity } => {
            svc.add_book(&isbn, &title, &author, quantity.max(0));
            println!("Book added/updated successfully.");
        }
        Command::AddMember { member_id, name, contact } => {
            if svc.add_member(&member_id, &name, &contact) {
                println!("Member added successfully.");
            } else {
                println!("Member {} already exists.", member_id);
            }
        }
        Command::Issue { isbn, member_id, days } => {
            let days = days.unwrap_or(config.default_loan_days);
            if svc.issue_book(&isbn, &member_id, days) {
                println!("Book issued successfully.");
            } else {
                println!("Cannot issue. Check ISBN/member or availability.");
            }
        }
        Command::Return { isbn, member_id } => {
            match svc.return_book(&isbn, &member_id) {
                ReturnOutcome::NoActiveLoan => println!("Active loan not found for this book and member."),
                ReturnOutcome::Returned { fine } if fine > 0.0 => println!("Book returned. Late fine: {:.2}", fine),
                ReturnOutcome::Returned { .. } => println!("Book returned. No fine."),
            }
        }
        Command::Search { title, author, format } => {
            let found = match (title, author) {
                (Some(title), _) => svc.search_books_by_title(&title),
                (None, Some(author)) => svc.search_books_by_author(&author),
                (None, None) => vec![],
            };
            print_records(&found, format, "No books found.")?;
        }
        Command::Available { isbn } => {
            if svc.is_book_available(&isbn) {
                println!("Available");
            } else {
                println!("Not available");
            }
        }
        Command::Books { format } => print_records(svc.get_all_books(), format, "No books added yet.")?,
        Command::Members { format } => print_records(svc.get_all_members(), format, "No members added yet.")?,
        Command::Loans { format } => print_records(svc.get_all_loans(), format, "No loans yet.")?,
        Command::Overdue { format } => print_records(&svc.get_overdue_loans(), format, "No overdue loans.")?,
    }
    Ok(())
}

fn print_records<T: Serialize + Display>(records: &[T], format: Format, empty_message: &str) -> LibraryResult<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(records)?),
        Format::Text => {
            if records.is_empty() {
                println!("{}", empty_message);
            }
            for record in records {
                println!("{}", record);
            }
        }
    }
    Ok(())
}
