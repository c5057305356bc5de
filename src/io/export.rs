use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::UserId;

/// Exporter for writing one owner's ledger as CSV
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export an owner's expenses, newest first
    pub async fn export_expenses_csv<W: Write>(&self, owner_id: UserId, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses(Some(owner_id)).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "description", "category", "amount"])?;

        for expense in &expenses {
            csv_writer.write_record(&[
                expense.id.to_string(),
                expense.date.to_string(),
                expense.description.clone(),
                expense.category.clone(),
                expense.amount.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(expenses.len())
    }

    /// Export an owner's category totals, largest first
    pub async fn export_totals_csv<W: Write>(&self, owner_id: UserId, writer: W) -> Result<usize> {
        let totals = self.service.category_totals(Some(owner_id)).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "total"])?;

        for total in &totals {
            csv_writer.write_record([total.label().to_string(), total.total.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(totals.len())
    }
}
