//! Free-text search over invoice records.

use medbill_invoicing::InvoiceRecord;

/// Records whose document number or issuer contains `term`, ignoring case.
///
/// Only the empty term matches everything; whitespace in `term` is part of
/// the substring. Relative order is preserved. No match yields an empty
/// vector, never an error. Diacritics are compared as-is (`"muller"` does
/// not match `"Müller"`).
pub fn filter_invoices<'a>(records: &'a [InvoiceRecord], term: &str) -> Vec<&'a InvoiceRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();

    let matches: Vec<&InvoiceRecord> = records
        .iter()
        .filter(|r| {
            r.document_number.to_lowercase().contains(&needle)
                || r.issued_by.to_lowercase().contains(&needle)
        })
        .collect();

    tracing::debug!(term = %needle, matched = matches.len(), of = records.len(), "filtered invoices");
    matches
}
