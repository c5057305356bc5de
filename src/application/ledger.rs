use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    CategoryTotal, Expense, ExpenseDraft, ExpenseId, NewExpense, NumericInput, Removal, UserId,
};
use crate::storage::{Repository, DATE_FORMAT};

use super::AppError;

/// Expense creation, listing, aggregation and deletion.
///
/// The owner id is taken from the caller as-is; nothing here checks that it
/// belongs to an authenticated user, and deletion does not check ownership.
#[derive(Clone)]
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Validate and record a new expense.
    pub async fn add_expense(&self, draft: ExpenseDraft) -> Result<ExpenseId, AppError> {
        let expense = validate_draft(draft)?;
        let expense_id = self.repo.insert_expense(&expense).await?;

        info!(
            expense_id,
            owner_id = expense.owner_id,
            category = %expense.category,
            "expense recorded"
        );
        Ok(expense_id)
    }

    /// List an owner's expenses, newest first. No owner means no expenses.
    pub async fn list_expenses(&self, owner_id: Option<UserId>) -> Result<Vec<Expense>, AppError> {
        match owner_id {
            Some(owner_id) => Ok(self.repo.list_expenses_by_owner(owner_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Totals per category for an owner, largest first. No owner means no totals.
    pub async fn category_totals(
        &self,
        owner_id: Option<UserId>,
    ) -> Result<Vec<CategoryTotal>, AppError> {
        match owner_id {
            Some(owner_id) => Ok(self.repo.sum_by_category(owner_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Delete an expense by id. Deleting a missing id is not an error.
    pub async fn remove_expense(&self, id: ExpenseId) -> Result<Removal, AppError> {
        let changes = self.repo.delete_expense(id).await?;
        info!(expense_id = id, changes, "expense delete requested");
        Ok(Removal { changes })
    }
}

fn validate_draft(draft: ExpenseDraft) -> Result<NewExpense, AppError> {
    let description = non_blank(draft.description);
    let category = non_blank(draft.category);
    let date = non_blank(draft.date);
    // A numeric zero counts as missing; the text "0" is a value.
    let amount = draft
        .amount
        .filter(|a| !a.is_blank() && !a.is_zero_number())
        .map(|a| coerce(&a, NumericInput::to_amount, "amount"))
        .transpose()?;
    let owner_id = draft
        .owner_id
        .filter(|o| !o.is_blank() && !o.is_zero_number())
        .map(|o| coerce(&o, NumericInput::to_id, "owner id"))
        .transpose()?;

    let mut missing = Vec::new();
    if description.is_none() {
        missing.push("description");
    }
    if amount.is_none() {
        missing.push("amount");
    }
    if category.is_none() {
        missing.push("category");
    }
    if date.is_none() {
        missing.push("date");
    }
    if owner_id.is_none() {
        missing.push("owner id");
    }

    match (description, amount, category, date, owner_id) {
        (Some(description), Some(amount), Some(category), Some(date), Some(owner_id)) => {
            let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
                AppError::Validation(format!("date: '{}' is not a YYYY-MM-DD date", date))
            })?;

            Ok(NewExpense {
                description,
                amount,
                category,
                date,
                owner_id,
            })
        }
        _ => Err(AppError::missing_fields(&missing)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn coerce<T, E: std::fmt::Display>(
    input: &NumericInput,
    parse: impl Fn(&NumericInput) -> Result<T, E>,
    field: &str,
) -> Result<T, AppError> {
    parse(input).map_err(|e| AppError::Validation(format!("{}: {}", field, e)))
}
