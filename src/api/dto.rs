//! Wire shapes for the JSON contract. Field names follow the existing
//! frontend (`senha`, `descricao`, `usuarioId`, ...).

use serde::{Deserialize, Serialize};

use crate::domain::{
    Amount, CategoryTotal, Expense, ExpenseDate, ExpenseDraft, ExpenseId, NumericInput, UserId,
};

/// Body of `POST /register` and `POST /login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub usuario_id: UserId,
}

/// Body of `POST /gastos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub valor: Option<NumericInput>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<NumericInput>,
}

impl From<ExpenseRequest> for ExpenseDraft {
    fn from(value: ExpenseRequest) -> Self {
        ExpenseDraft {
            description: value.descricao,
            amount: value.valor,
            category: value.categoria,
            date: value.data,
            owner_id: value.usuario_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreatedResponse {
    pub message: String,
    pub gasto_id: ExpenseId,
}

/// One row of `GET /gastos/{usuarioId}`, shaped like the `gastos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub descricao: String,
    pub valor: Amount,
    pub categoria: String,
    pub data: ExpenseDate,
    pub usuario_id: UserId,
}

impl From<Expense> for ExpenseRow {
    fn from(value: Expense) -> Self {
        Self {
            id: value.id,
            descricao: value.description,
            valor: value.amount,
            categoria: value.category,
            data: value.date,
            usuario_id: value.owner_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub changes: u64,
}

/// One row of `GET /gastos/agrupados/{usuarioId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotalRow {
    pub categoria: String,
    pub total: Amount,
}

impl From<CategoryTotal> for CategoryTotalRow {
    fn from(value: CategoryTotal) -> Self {
        Self {
            categoria: value.category,
            total: value.total,
        }
    }
}
