//! Asynchronous roster reader with batch interface
//!
//! Reads member records from any `futures::io::AsyncRead` source in batches.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - the csv_format module for header checks and row conversion
//!
//! ```text
//! AsyncRead → AsyncReader → Batches of Members
//!                  ↓
//!           csv_format module
//!           (CsvMemberRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, validate_headers, CsvMemberRecord, DELIMITER};
use crate::types::{DuesError, Member};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous roster reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a reader and validate the header row
    ///
    /// The source must already be positioned after any byte order mark.
    ///
    /// # Errors
    ///
    /// Returns a ParseError if a required column is missing.
    pub async fn new(reader: R) -> Result<Self, DuesError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .delimiter(DELIMITER)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .await?
            .iter()
            .map(str::to_string)
            .collect();
        validate_headers(headers.iter().map(String::as_str))?;

        Ok(Self {
            csv_reader,
            line_num: 1,
        })
    }

    /// Read up to `batch_size` members
    ///
    /// Returns an empty vector at end of file.
    ///
    /// # Errors
    ///
    /// Returns the first row error, with its line number. Rows read before
    /// the failing one are discarded.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<Member>, DuesError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvMemberRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(result) => {
                    self.line_num += 1;
                    let member = result
                        .map_err(DuesError::from)
                        .and_then(convert_csv_record)
                        .map_err(|e| e.at_line(self.line_num))?;
                    batch.push(member);
                }
                None => break,
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Department;
    use futures::io::Cursor;

    const HEADER: &str = "Mitgliedsnummer;Vorname;Nachname;Geburtsdatum;Status;Hauptzahler Mitgliedsnummer;Beitragskategorie;Abteilung\n";

    fn roster(rows: &str) -> Cursor<Vec<u8>> {
        Cursor::new(format!("{}{}", HEADER, rows).into_bytes())
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut reader = AsyncReader::new(roster(
            "1;Anna;Berg;30000;Aktiv;1;Familie;Tennis\n\
             2;Ben;Berg;40000;Aktiv;1;Familie;Tennis\n\
             3;Carl;Dorn;25000;Passiv;3;Mitglied;Wandern\n",
        ))
        .await
        .unwrap();

        let batch = reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[1].id, 2);
        assert_eq!(batch[1].payer, 1);

        let batch = reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].department, Department::Hiking);

        let batch = reader.read_batch(2).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_roster() {
        let mut reader = AsyncReader::new(roster("")).await.unwrap();

        let batch = reader.read_batch(10).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_rejects_missing_column() {
        let source = Cursor::new(b"Mitgliedsnummer;Vorname\n1;Anna\n".to_vec());

        let result = AsyncReader::new(source).await;
        assert!(matches!(result, Err(DuesError::ParseError { .. })));
    }

    #[tokio::test]
    async fn test_async_reader_fails_on_unknown_label() {
        let mut reader = AsyncReader::new(roster(
            "1;Anna;Berg;30000;Aktiv;1;Familie;Tennis\n\
             2;Ben;Berg;40000;Aktiv;2;Ehrenmitglied;Tennis\n",
        ))
        .await
        .unwrap();

        let err = reader.read_batch(10).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Roster parse error at line 3: unknown category 'Ehrenmitglied'"
        );
    }
}
