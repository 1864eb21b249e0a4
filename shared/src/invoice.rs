//! Invoice document assembly
//!
//! Turns a committed Sold transaction plus the seller's presentation
//! settings into the fully-computed document the PDF renderer consumes:
//! per-line GST at the fixed 9%/9% CGST/SGST split, a grand-total row,
//! and the grand total spelled out in words. The renderer only lays out
//! what is computed here.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::convert::round_money;
use crate::models::{
    InvoiceDocument, InvoiceLine, InvoiceSettings, InvoiceTotals, LineOutcome, Transaction,
};
use crate::words::rupees_in_words;

/// Central GST rate: 9% (applied once each for CGST and SGST).
pub fn gst_rate() -> Decimal {
    Decimal::new(9, 2)
}

/// Compute one invoice line from a stored line outcome.
fn invoice_line(s_no: u32, line: &LineOutcome) -> InvoiceLine {
    let amount = round_money(line.sold_amount);
    let cgst = round_money(amount * gst_rate());
    let sgst = round_money(amount * gst_rate());
    InvoiceLine {
        s_no,
        description: line
            .description
            .clone()
            .or_else(|| line.profile.clone())
            .unwrap_or_else(|| "-".to_string()),
        hsn_code: line.hsn_code.clone().unwrap_or_else(|| "-".to_string()),
        qty: line.sold_qty,
        packets: line.sold_packs,
        lengths: line.sold_lengths,
        rate: line.rate,
        amount,
        cgst,
        sgst,
        total: round_money(amount + cgst + sgst),
    }
}

/// Assemble the complete invoice document for a transaction.
pub fn build_invoice(
    invoice_no: String,
    date: NaiveDate,
    settings: InvoiceSettings,
    transaction: &Transaction,
) -> InvoiceDocument {
    let lines: Vec<InvoiceLine> = transaction
        .items
        .iter()
        .enumerate()
        .map(|(idx, line)| invoice_line(idx as u32 + 1, line))
        .collect();

    let mut totals = InvoiceTotals {
        qty: Decimal::ZERO,
        packets: Decimal::ZERO,
        lengths: Decimal::ZERO,
        subtotal: Decimal::ZERO,
        cgst: Decimal::ZERO,
        sgst: Decimal::ZERO,
        grand_total: Decimal::ZERO,
    };
    for line in &lines {
        totals.qty += line.qty;
        totals.packets += line.packets;
        totals.lengths += line.lengths;
        totals.subtotal += line.amount;
        totals.cgst += line.cgst;
        totals.sgst += line.sgst;
        totals.grand_total += line.total;
    }

    let amount_in_words = rupees_in_words(totals.grand_total);

    InvoiceDocument {
        invoice_no,
        date,
        seller: settings,
        buyer: transaction.counterparty.clone(),
        lines,
        totals,
        amount_in_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CounterpartyInfo, TransactionType};
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn outcome(amount: &str) -> LineOutcome {
        LineOutcome {
            profile: Some("A".to_string()),
            code: Some("A1".to_string()),
            hsn_code: Some("7604".to_string()),
            description: Some("Angle 25mm".to_string()),
            rate: dec("5"),
            sold_qty: dec("40"),
            sold_lengths: dec("40"),
            sold_packs: dec("4"),
            sold_amount: dec(amount),
        }
    }

    fn sold_transaction(amounts: &[&str]) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            tx_type: TransactionType::Sold,
            items: amounts.iter().map(|a| outcome(a)).collect(),
            total_amount: amounts.iter().map(|a| dec(a)).sum(),
            counterparty: CounterpartyInfo::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_line_gst_split() {
        let tx = sold_transaction(&["200"]);
        let doc = build_invoice(
            "INV-1".to_string(),
            Utc::now().date_naive(),
            InvoiceSettings::default(),
            &tx,
        );
        let line = &doc.lines[0];
        assert_eq!(line.cgst, dec("18.00"));
        assert_eq!(line.sgst, dec("18.00"));
        assert_eq!(line.total, dec("236.00"));
    }

    #[test]
    fn test_totals_are_column_sums() {
        let tx = sold_transaction(&["100", "250.50"]);
        let doc = build_invoice(
            "INV-2".to_string(),
            Utc::now().date_naive(),
            InvoiceSettings::default(),
            &tx,
        );
        assert_eq!(doc.totals.subtotal, dec("350.50"));
        assert_eq!(doc.totals.cgst, dec("31.55"));
        assert_eq!(doc.totals.sgst, dec("31.55"));
        assert_eq!(
            doc.totals.grand_total,
            doc.totals.subtotal + doc.totals.cgst + doc.totals.sgst
        );
    }

    #[test]
    fn test_line_numbering_starts_at_one() {
        let tx = sold_transaction(&["10", "20", "30"]);
        let doc = build_invoice(
            "INV-3".to_string(),
            Utc::now().date_naive(),
            InvoiceSettings::default(),
            &tx,
        );
        let numbers: Vec<u32> = doc.lines.iter().map(|l| l.s_no).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
