use std::fs;
use std::path::{Path, PathBuf};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;
use crate::utils::text::eq_ignore_case;

// Identifiable defines common traits that can be shared by keyed records
pub trait Identifiable {
    fn id(&self) -> &str;

    // keys are compared without regard to case
    fn has_id(&self, id: &str) -> bool {
        eq_ignore_case(self.id(), id)
    }
}

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub books_file: String,
    pub members_file: String,
    pub loans_file: String,
    pub fine_per_day: f64,
    pub default_loan_days: i64,
    pub store: RepositoryStore,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            data_dir: PathBuf::from("."),
            books_file: "books.txt".to_string(),
            members_file: "members.txt".to_string(),
            loans_file: "loans.txt".to_string(),
            fine_per_day: 2.0,
            default_loan_days: 14,
            store: RepositoryStore::AtomicTextFile,
        }
    }
}

impl Configuration {
    pub fn new(data_dir: &Path) -> Self {
        Configuration {
            data_dir: data_dir.to_path_buf(),
            ..Configuration::default()
        }
    }

    // load reads a JSON config file, falling back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> LibraryResult<Self> {
        let config = match path {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                serde_json::from_str::<Configuration>(&json)?
            }
            None => Configuration::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.fine_per_day.is_nan() || self.fine_per_day < 0.0 {
            return Err(LibraryError::validation(
                format!("fine_per_day must be a non-negative number, got {}", self.fine_per_day).as_str(),
                Some("fine_per_day".to_string())));
        }
        Ok(())
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn members_path(&self) -> PathBuf {
        self.data_dir.join(&self.members_file)
    }

    pub fn loans_path(&self) -> PathBuf {
        self.data_dir.join(&self.loans_file)
    }
}

// Clock supplies the current calendar date for loan and fine computations
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
