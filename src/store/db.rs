use duckdb::{Connection, ToSql};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Result, ScrapeError};
use crate::process::record::{Dataset, Value};

/// Append-only DuckDB sink: one table per dataset, all columns `VARCHAR`.
pub struct Database {
    conn: Connection,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl Database {
    /// Open a DuckDB database on disk at `path`, creating the file if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Open a DuckDB in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create `table` with one VARCHAR column per entry in `columns`, unless it exists.
    pub fn ensure_table(&self, table: &str, columns: &[String]) -> Result<()> {
        let cols = columns
            .iter()
            .map(|c| format!("{} VARCHAR", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("CREATE TABLE IF NOT EXISTS {} ({});", quote_ident(table), cols);
        debug!(%sql, "ensure table");
        self.conn.execute(&sql, [])?;
        Ok(())
    }

    /// Column names of `table` in table order. Empty when the table doesn't exist.
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_name = ? ORDER BY ordinal_position;",
        )?;
        let rows = stmt.query_map([table], |r| r.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Bulk-append every record via the Appender, returning the row count.
    /// Values go in by column name; table columns the dataset lacks are null.
    /// A dataset column the table doesn't have fails the whole append, and
    /// any failure leaves the table as it was. Nothing is migrated.
    pub fn append(&self, table: &str, dataset: &Dataset) -> Result<usize> {
        let columns = dataset.columns();
        if columns.is_empty() {
            return Ok(0);
        }
        self.ensure_table(table, &columns)?;

        let table_columns = self.table_columns(table)?;
        let unknown: Vec<&str> = columns
            .iter()
            .filter(|c| !table_columns.contains(c))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(ScrapeError::storage(
                table,
                format!("columns {:?} not in table {:?}", unknown, table_columns),
            ));
        }

        let start = Instant::now();
        self.conn.execute_batch("BEGIN TRANSACTION;")?;
        match self.append_rows(table, &table_columns, dataset) {
            Ok(rows) => {
                self.conn.execute_batch("COMMIT;")?;
                info!(table, rows, elapsed = ?start.elapsed(), "appended rows");
                Ok(rows)
            }
            Err(e) => {
                if let Err(rb) = self.conn.execute_batch("ROLLBACK;") {
                    warn!(table, error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// The Appender is dropped before this returns, so the caller can settle the transaction.
    fn append_rows(&self, table: &str, table_columns: &[String], dataset: &Dataset) -> Result<usize> {
        let mut appender = self.conn.appender(table)?;
        for record in dataset {
            let values: Vec<Value> = record.project_values(table_columns);
            let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
            appender.append_row(params.as_slice())?;
        }
        appender.flush()?;
        Ok(dataset.len())
    }

    pub fn count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {};", quote_ident(table));
        Ok(self.conn.query_row(&sql, [], |r| r.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::record::Record;

    fn olympiad() -> Dataset {
        vec![
            Record::new()
                .with("Olympiad", "XXVIII")
                .with("Years", "2004")
                .with("Host City", "Athens"),
            Record::new().with("Olympiad", "XXIX").with("Years", "2008"),
        ]
        .into()
    }

    #[test]
    fn appends_and_keeps_nulls() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        assert_eq!(db.append("Olympiad", &olympiad())?, 2);
        assert_eq!(db.append("Olympiad", &olympiad())?, 2);
        assert_eq!(db.count("Olympiad")?, 4);

        let nulls: i64 = db.conn.query_row(
            "SELECT COUNT(*) FROM \"Olympiad\" WHERE \"Host City\" IS NULL;",
            [],
            |r| r.get(0),
        )?;
        assert_eq!(nulls, 2);
        Ok(())
    }

    fn sports(db: &Database) -> anyhow::Result<Vec<Option<String>>> {
        let mut stmt = db.conn.prepare("SELECT \"Sport\" FROM \"Sports\" ORDER BY 1;")?;
        let rows = stmt.query_map([], |r| r.get::<_, Option<String>>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    #[test]
    fn mismatched_columns_leave_table_untouched() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        db.append("Sports", &vec![Record::new().with("Sport", "Archery")].into())?;
        let wider: Dataset = vec![Record::new().with("Sport", "Judo").with("Code", "JUD")].into();

        let err = db.append("Sports", &wider).unwrap_err();
        assert!(matches!(err, ScrapeError::Storage { .. }), "{:?}", err);
        assert_eq!(db.count("Sports")?, 1);
        assert_eq!(sports(&db)?, vec![Some("Archery".to_string())]);
        assert_eq!(db.table_columns("Sports")?, vec!["Sport"]);
        Ok(())
    }

    #[test]
    fn appends_by_column_name_into_existing_table() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        db.append(
            "CountryMedals",
            &vec![Record::new().with("Team", "Kenya").with("Gold", "4")].into(),
        )?;
        db.append(
            "CountryMedals",
            &vec![Record::new().with("Gold", "9").with("Team", "Peru")].into(),
        )?;
        // Narrower dataset: the missing column comes out null.
        db.append("CountryMedals", &vec![Record::new().with("Team", "Chile")].into())?;

        let mut stmt = db
            .conn
            .prepare("SELECT \"Team\", \"Gold\" FROM \"CountryMedals\" ORDER BY \"Team\";")?;
        let rows: Vec<(String, Option<String>)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;
        assert_eq!(
            rows,
            vec![
                ("Chile".to_string(), None),
                ("Kenya".to_string(), Some("4".to_string())),
                ("Peru".to_string(), Some("9".to_string())),
            ]
        );
        Ok(())
    }

    #[test]
    fn missing_table_has_no_columns() -> anyhow::Result<()> {
        let db = Database::open_in_memory()?;
        assert!(db.table_columns("Olympiad")?.is_empty());
        assert_eq!(db.append("Olympiad", &Dataset::new())?, 0);
        assert!(db.table_columns("Olympiad")?.is_empty());
        Ok(())
    }
}
