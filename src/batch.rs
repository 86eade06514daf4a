//! Batch generation of payment codes from CSV.
//!
//! Reads one payment request per row and generates its BR-Code. Rows are
//! processed one at a time in input order; invalid rows are logged and
//! skipped so a single bad order does not block the rest of the batch.

use crate::error::Result;
use crate::payload::{generate_pix_emv_payload, PixPayloadRequest};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// A generated code, keyed by the merchant's txid.
#[derive(Debug, Clone)]
pub struct GeneratedPayload {
    pub txid: String,
    pub payload: String,
}

/// Collects generated payloads for a batch of requests.
///
/// # Output Ordering
///
/// Payloads are written in the same order as the input rows.
pub struct PayloadBatch {
    generated: Vec<GeneratedPayload>,
    skipped: usize,
}

impl PayloadBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        PayloadBatch {
            generated: Vec::new(),
            skipped: 0,
        }
    }

    /// Processes requests from a CSV reader in streaming fashion.
    ///
    /// Expects the header `pix_key,merchant_name,merchant_city,amount,txid`.
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<PixPayloadRequest>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(request) => self.process_request(&request, row_num),
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    self.skipped += 1;
                }
            }
        }

        Ok(())
    }

    /// Generates the payload for one request, recording it on success.
    pub fn process_request(&mut self, request: &PixPayloadRequest, row: usize) {
        match generate_pix_emv_payload(request) {
            Ok(payload) => {
                debug!("Row {}: Generated payload for txid {:?}", row, request.txid);
                self.generated.push(GeneratedPayload {
                    txid: request.txid.clone(),
                    payload,
                });
            }
            Err(e) => {
                warn!("Row {}: {}", row, e);
                self.skipped += 1;
            }
        }
    }

    /// Writes `txid,payload` rows to CSV.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["txid", "payload"])?;

        for generated in &self.generated {
            csv_writer.write_record([generated.txid.as_str(), generated.payload.as_str()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Payloads generated so far, in input order.
    pub fn generated(&self) -> &[GeneratedPayload] {
        &self.generated
    }

    /// Number of rows that were rejected.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Default for PayloadBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn process_csv_str(csv: &str) -> PayloadBatch {
        let mut batch = PayloadBatch::new();
        batch.process_csv(Cursor::new(csv)).unwrap();
        batch
    }

    #[test]
    fn test_single_request() {
        let csv = r#"pix_key,merchant_name,merchant_city,amount,txid
11999999999,Loja Exemplo,Sao Paulo,10,ABC123"#;

        let batch = process_csv_str(csv);
        assert_eq!(batch.generated().len(), 1);
        assert_eq!(batch.generated()[0].txid, "ABC123");
        assert!(batch.generated()[0].payload.ends_with("63044DC2"));
        assert_eq!(batch.skipped(), 0);
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = r#"pix_key,merchant_name,merchant_city,amount,txid
11999999999,Loja Exemplo,Sao Paulo,10,A1
11999999999,Loja Exemplo,Sao Paulo,-5,A2
11999999999,Loja Exemplo,Sao Paulo,abc,A3
,Loja Exemplo,Sao Paulo,10,A4
11999999999,Loja Exemplo,Sao Paulo,0.50,A5"#;

        let batch = process_csv_str(csv);
        let txids: Vec<&str> = batch.generated().iter().map(|g| g.txid.as_str()).collect();
        assert_eq!(txids, vec!["A1", "A5"]);
        assert_eq!(batch.skipped(), 3);
    }

    #[test]
    fn test_wrong_column_count_is_skipped() {
        let csv = r#"pix_key,merchant_name,merchant_city,amount,txid
11999999999,Loja Exemplo,Sao Paulo
11999999999,Loja Exemplo,Sao Paulo,10,OK1"#;

        let batch = process_csv_str(csv);
        assert_eq!(batch.generated().len(), 1);
        assert_eq!(batch.skipped(), 1);
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = r#"pix_key, merchant_name, merchant_city, amount, txid
 11999999999 , Loja Exemplo , Sao Paulo , 10 , ABC123 "#;

        let batch = process_csv_str(csv);
        assert_eq!(batch.generated().len(), 1);
        assert!(batch.generated()[0].payload.ends_with("63044DC2"));
    }

    #[test]
    fn test_output_format() {
        let csv = r#"pix_key,merchant_name,merchant_city,amount,txid
11999999999,Loja Exemplo,Sao Paulo,10,ABC123"#;

        let batch = process_csv_str(csv);
        let mut output = Vec::new();
        batch.write_output(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.starts_with("txid,payload\n"));
        assert!(output_str.contains(
            "ABC123,00020101021126330014BR.GOV.BCB.PIX011111999999999520400005303986\
             540510.005802BR5912Loja Exemplo6009Sao Paulo62100506ABC12363044DC2"
        ));
    }
}
