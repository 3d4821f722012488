use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use invoicekit_core::{AggregateRoot, DomainError, DomainResult, first_duplicate_id, ids_are_unique};

use crate::line::{Amount, InvoiceLine};

/// Aggregate root: Invoice.
///
/// Owns its lines outright. Invariant: no two lines share an id, and no
/// mutation can make that observable even transiently, because every
/// structural change is committed through [`Invoice::try_set_lines`].
#[derive(Debug, PartialEq, Serialize)]
pub struct Invoice {
    date: DateTime<Utc>,
    number: i64,
    lines: Vec<InvoiceLine>,
}

impl Default for Invoice {
    fn default() -> Self {
        Self {
            date: Utc::now(),
            number: -1,
            lines: Vec::new(),
        }
    }
}

/// Parses the date forms accepted at text boundaries: RFC 3339 timestamps
/// and `YYYY-MM-DD` calendar dates (taken as midnight UTC).
///
/// Anything else yields `None`, the invalid-date sentinel.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

impl Invoice {
    /// Builds an invoice from defaults, routing every argument through its
    /// setter: an invalid date or a line set with duplicate ids leaves the
    /// corresponding default in place.
    pub fn new(
        date: impl Into<Option<DateTime<Utc>>>,
        number: i64,
        lines: Vec<InvoiceLine>,
    ) -> Self {
        let mut invoice = Self::default();
        invoice.set_date(date).set_number(number).set_lines(lines);
        invoice
    }

    pub fn is_valid_date(date: Option<&DateTime<Utc>>) -> bool {
        date.is_some()
    }

    /// Invoice numbers are whole numbers of either sign; `i64` carries the
    /// whole rule.
    pub fn is_valid_number(_number: i64) -> bool {
        true
    }

    /// True iff the ids of `lines` are pairwise distinct. Checked over the
    /// whole candidate: one repeated id invalidates all of it.
    pub fn is_valid_lines(lines: &[InvoiceLine]) -> bool {
        ids_are_unique(lines)
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    pub fn get_all_invoice_lines(&self) -> &[InvoiceLine] {
        self.lines()
    }

    /// First line carrying `line_id`.
    pub fn get_invoice_line(&self, line_id: i64) -> Option<&InvoiceLine> {
        self.lines.iter().find(|line| line.id() == line_id)
    }

    /// One past the largest line id present, `0` for an empty invoice.
    pub fn next_line_id(&self) -> i64 {
        self.lines
            .iter()
            .map(InvoiceLine::id)
            .max()
            .map_or(0, |id| id.saturating_add(1))
    }

    pub fn set_date(&mut self, date: impl Into<Option<DateTime<Utc>>>) -> &mut Self {
        let _ = self.try_set_date(date);
        self
    }

    pub fn try_set_date(&mut self, date: impl Into<Option<DateTime<Utc>>>) -> DomainResult<&mut Self> {
        match date.into() {
            Some(date) => {
                self.date = date;
                Ok(self)
            }
            None => {
                tracing::debug!(invoice_number = self.number, "invoice date rejected");
                Err(DomainError::validation(
                    "invoice date must be a valid calendar date",
                ))
            }
        }
    }

    /// Text form of [`Invoice::set_date`]; see [`parse_date`].
    pub fn set_date_str(&mut self, input: &str) -> &mut Self {
        self.set_date(parse_date(input))
    }

    pub fn set_number(&mut self, number: i64) -> &mut Self {
        self.number = number;
        self
    }

    pub fn set_lines(&mut self, lines: Vec<InvoiceLine>) -> &mut Self {
        let _ = self.try_set_lines(lines);
        self
    }

    /// The single gate for structural changes: validate the whole candidate,
    /// then commit it or leave the current lines untouched.
    pub fn try_set_lines(&mut self, lines: Vec<InvoiceLine>) -> DomainResult<&mut Self> {
        if let Some(line_id) = first_duplicate_id(&lines) {
            tracing::debug!(
                invoice_number = self.number,
                line_id,
                "invoice lines rejected: duplicate line id"
            );
            return Err(DomainError::invariant(format!(
                "duplicate invoice line id {line_id}"
            )));
        }

        tracing::trace!(
            invoice_number = self.number,
            line_count = lines.len(),
            "invoice lines committed"
        );
        self.lines = lines;
        Ok(self)
    }

    /// Appends `line` unless its id is already taken.
    pub fn add_invoice_line(&mut self, line: InvoiceLine) -> &mut Self {
        let _ = self.try_add_invoice_line(line);
        self
    }

    pub fn try_add_invoice_line(&mut self, line: InvoiceLine) -> DomainResult<&mut Self> {
        let mut candidate = Vec::with_capacity(self.lines.len() + 1);
        candidate.extend(self.lines.iter().cloned());
        candidate.push(line);
        self.try_set_lines(candidate)
    }

    /// Adds each line in order; every line is accepted or rejected on its own.
    pub fn add_invoice_lines(&mut self, lines: impl IntoIterator<Item = InvoiceLine>) -> &mut Self {
        for line in lines {
            self.add_invoice_line(line);
        }
        self
    }

    /// Applies `edit` to a copy of the line carrying `line_id` and commits the
    /// result through the lines gate. Ignored if the line is absent or the
    /// edit would duplicate an id.
    pub fn update_invoice_line(
        &mut self,
        line_id: i64,
        edit: impl FnOnce(&mut InvoiceLine),
    ) -> &mut Self {
        let _ = self.try_update_invoice_line(line_id, edit);
        self
    }

    pub fn try_update_invoice_line(
        &mut self,
        line_id: i64,
        edit: impl FnOnce(&mut InvoiceLine),
    ) -> DomainResult<&mut Self> {
        let Some(position) = self.lines.iter().position(|line| line.id() == line_id) else {
            tracing::debug!(
                invoice_number = self.number,
                line_id,
                "invoice line update ignored: no such line"
            );
            return Err(DomainError::not_found());
        };

        let mut candidate = self.lines.clone();
        edit(&mut candidate[position]);
        self.try_set_lines(candidate)
    }

    /// Removes and returns the line carrying `line_id`.
    pub fn remove_invoice_line(&mut self, line_id: i64) -> Option<InvoiceLine> {
        self.try_remove_invoice_line(line_id).ok()
    }

    pub fn try_remove_invoice_line(&mut self, line_id: i64) -> DomainResult<InvoiceLine> {
        let Some(position) = self.lines.iter().position(|line| line.id() == line_id) else {
            tracing::debug!(
                invoice_number = self.number,
                line_id,
                "invoice line removal ignored: no such line"
            );
            return Err(DomainError::not_found());
        };
        Ok(self.lines.remove(position))
    }

    /// Sum of line totals, left to right. `0.0` when there are no lines.
    pub fn total(&self) -> f64 {
        self.lines.iter().fold(0.0, |total, line| total + line.total())
    }

    /// Appends a copy of every line of `other`, in order. Lines whose id is
    /// already present (including ids merged earlier in the same call) are
    /// dropped one by one; `other` is left as is.
    pub fn merge_invoice(&mut self, other: &Invoice) -> &mut Self {
        for line in other.lines() {
            self.add_invoice_line(line.clone());
        }
        self
    }

    pub fn merge_invoices<'a>(&mut self, others: impl IntoIterator<Item = &'a Invoice>) -> &mut Self {
        for other in others {
            self.merge_invoice(other);
        }
        self
    }
}

impl Clone for Invoice {
    /// Rebuilds through [`Invoice::new`], so the copied lines pass the same
    /// validation as any other candidate.
    fn clone(&self) -> Self {
        Invoice::new(self.date, self.number, self.lines.to_vec())
    }
}

impl AggregateRoot for Invoice {
    type Id = i64;
    type Member = InvoiceLine;

    fn id(&self) -> &Self::Id {
        &self.number
    }

    fn members(&self) -> &[InvoiceLine] {
        &self.lines
    }
}

impl core::fmt::Display for Invoice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "------------------ Invoice #{} ------------------", self.number)?;
        writeln!(f, " {}", self.date.format("%a %b %d %Y"))?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "    {line}")?;
        }
        writeln!(f)?;
        writeln!(f, " Total: ${}", Amount(self.total()))
    }
}
