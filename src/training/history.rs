use std::fmt::{self, Display};

use crate::{FitErr, Result};

/// An append-only record of the solver's progress, one named column per tracked quantity.
///
/// The first update fixes the set of keys, every later update must carry exactly the same
/// keys. At most `max_iter + 1` updates are accepted: the initial state plus one per
/// iteration.
#[derive(Debug, Clone)]
pub struct History {
    title: Option<String>,
    max_iter: usize,
    keys: Vec<&'static str>,
    values: Vec<Vec<f64>>,
}

impl History {
    /// Creates a new empty `History`.
    ///
    /// # Arguments
    /// * `title` - An optional title, printed above the table.
    /// * `max_iter` - The iteration budget of the solver being tracked.
    pub fn new(title: Option<String>, max_iter: usize) -> Self {
        Self {
            title,
            max_iter,
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends a record.
    ///
    /// # Arguments
    /// * `record` - The `(key, value)` pairs of this update, in any order.
    ///
    /// # Returns
    /// An error if the history is full or if the keys differ from the first update's.
    pub fn update(&mut self, record: &[(&'static str, f64)]) -> Result<()> {
        let updates = self.len();

        if updates > self.max_iter {
            return Err(FitErr::HistoryFull {
                updates,
                max_iter: self.max_iter,
            });
        }

        if let Some(key) = duplicated_key(record) {
            return Err(FitErr::HistoryDuplicateKey { key });
        }

        if self.keys.is_empty() {
            self.keys = record.iter().map(|&(key, _)| key).collect();
            self.values = record.iter().map(|&(_, value)| vec![value]).collect();
            return Ok(());
        }

        let mismatch = || FitErr::HistoryKeysMismatch {
            expected: self.keys.clone(),
            got: record.iter().map(|&(key, _)| key).collect(),
        };

        if record.len() != self.keys.len() {
            return Err(mismatch());
        }

        let mut columns = Vec::with_capacity(record.len());
        for &(key, value) in record {
            let column = self
                .keys
                .iter()
                .position(|&k| k == key)
                .ok_or_else(mismatch)?;

            columns.push((column, value));
        }

        for (column, value) in columns {
            self.values[column].push(value);
        }

        Ok(())
    }

    /// The recorded values of `key`, in update order.
    pub fn values(&self, key: &str) -> Option<&[f64]> {
        let column = self.keys.iter().position(|&k| k == key)?;
        Some(&self.values[column])
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// The amount of updates recorded so far.
    pub fn len(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every record, the keys included.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }
}

fn duplicated_key(record: &[(&'static str, f64)]) -> Option<&'static str> {
    record
        .iter()
        .enumerate()
        .find(|&(i, &(key, _))| record[..i].iter().any(|&(k, _)| k == key))
        .map(|(_, &(key, _))| key)
}

impl Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }

        for key in &self.keys {
            write!(f, "{key:>10}")?;
        }
        writeln!(f)?;

        for row in 0..self.len() {
            for (key, column) in self.keys.iter().zip(&self.values) {
                let value = column[row];

                if *key == "epoch" {
                    write!(f, "{:>10}", value as usize)?;
                } else {
                    write!(f, "{:>10}", format!("{value:.2e}"))?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
