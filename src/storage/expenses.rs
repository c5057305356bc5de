use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use sqlx::Row;
use tracing::warn;

use crate::domain::{CategoryTotal, Expense, ExpenseDate, ExpenseId, NewExpense, UserId};

use super::Repository;

/// Storage format for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl Repository {
    // ========================
    // Expense operations
    // ========================

    /// Insert a new expense and return its id.
    pub async fn insert_expense(&self, expense: &NewExpense) -> Result<ExpenseId> {
        let done = sqlx::query(
            r#"
            INSERT INTO gastos (descricao, valor, categoria, data, usuario_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date.format(DATE_FORMAT).to_string())
        .bind(expense.owner_id)
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;

        Ok(done.last_insert_rowid())
    }

    /// List an owner's expenses, newest date first. Expenses sharing a date
    /// keep insertion order.
    pub async fn list_expenses_by_owner(&self, owner_id: UserId) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, descricao, valor, categoria, data, usuario_id
            FROM gastos
            WHERE usuario_id = ?
            ORDER BY data DESC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Sum an owner's expenses per category, largest total first. Equal
    /// totals are ordered by category name.
    pub async fn sum_by_category(&self, owner_id: UserId) -> Result<Vec<CategoryTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT categoria, SUM(valor) as total
            FROM gastos
            WHERE usuario_id = ?
            GROUP BY categoria
            ORDER BY total DESC, categoria ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to sum expenses by category")?;

        rows.iter()
            .map(|row| {
                let category: String = row.get("categoria");
                let total: f64 = row.get("total");
                if !total.is_finite() {
                    bail!("Total for category '{}' is out of range", category);
                }
                Ok(CategoryTotal { category, total })
            })
            .collect()
    }

    /// Delete an expense by id, whoever owns it. Returns the number of rows
    /// removed (0 or 1).
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<u64> {
        let done = sqlx::query("DELETE FROM gastos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;

        Ok(done.rows_affected())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let id: ExpenseId = row.get("id");
        let date_str: String = row.get("data");
        let date = match NaiveDate::parse_from_str(&date_str, DATE_FORMAT) {
            Ok(date) => ExpenseDate::Calendar(date),
            Err(_) => {
                warn!(expense_id = id, date = %date_str, "expense date is not YYYY-MM-DD");
                ExpenseDate::Legacy(date_str)
            }
        };

        Ok(Expense {
            id,
            description: row.get("descricao"),
            amount: row.get("valor"),
            category: row.get("categoria"),
            date,
            owner_id: row.get("usuario_id"),
        })
    }
}
