//! Expense handlers. The owner id comes from the request as-is.

use actix_web::{delete, get, post, web, HttpResponse};

use crate::application::Services;
use crate::domain::{ExpenseId, Removal, UserId};

use super::dto::{
    CategoryTotalRow, DeleteResponse, ExpenseCreatedResponse, ExpenseRequest, ExpenseRow,
};
use super::error::{ApiError, ApiResult};

/// Record an expense. Answers 201 with the new expense id.
#[post("/gastos")]
pub async fn add_expense(
    services: web::Data<Services>,
    body: web::Json<ExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let gasto_id = services
        .ledger
        .add_expense(body.into_inner().into())
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to save expense"))?;

    Ok(HttpResponse::Created().json(ExpenseCreatedResponse {
        message: "Expense added successfully".to_string(),
        gasto_id,
    }))
}

/// Category totals for one owner, largest first.
#[get("/gastos/agrupados/{usuario_id}")]
pub async fn category_totals(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CategoryTotalRow>>> {
    let totals = services
        .ledger
        .category_totals(parse_id::<UserId>(&path))
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to fetch grouped expenses"))?;

    Ok(web::Json(totals.into_iter().map(Into::into).collect()))
}

/// All expenses of one owner, newest first. An unknown or malformed owner
/// id yields an empty list.
#[get("/gastos/{usuario_id}")]
pub async fn list_expenses(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ExpenseRow>>> {
    let expenses = services
        .ledger
        .list_expenses(parse_id::<UserId>(&path))
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to fetch expenses"))?;

    Ok(web::Json(expenses.into_iter().map(Into::into).collect()))
}

/// Delete an expense by id. A missing id answers 200 with `changes: 0`.
#[delete("/gastos/{id}")]
pub async fn delete_expense(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let removal = match parse_id::<ExpenseId>(&path) {
        Some(id) => services
            .ledger
            .remove_expense(id)
            .await
            .map_err(|e| ApiError::from_app(e, "Failed to delete expense"))?,
        None => Removal { changes: 0 },
    };

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Expense deleted successfully".to_string(),
        changes: removal.changes,
    }))
}

fn parse_id<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}
