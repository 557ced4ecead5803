//! Transaction management utilities.
//!
//! Every mutating operation runs inside one `IMMEDIATE` transaction. SQLite
//! grants the write lock when the transaction begins, so concurrent writers
//! (other threads or other processes on the same file) queue on the busy
//! timeout instead of interleaving between a check and a mutation.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Begins an `IMMEDIATE` transaction on this connection.
    ///
    /// Dropping the returned transaction without calling `commit` rolls
    /// back every statement executed through it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StoreUnavailable`] if the write lock cannot
    /// be acquired within the busy timeout.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dinocage::database::{Database, DatabaseConfig};
    /// use dinocage::{Capacity, Category};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/dinocage.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// Database::insert_cage(&tx, Capacity::default(), Category::Herbivore).unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}
