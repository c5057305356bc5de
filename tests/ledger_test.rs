mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{add, insert_raw_expense, register, test_services};
use rstest::rstest;
use spendbook::application::{AppError, ErrorKind};
use spendbook::domain::{ExpenseDate, ExpenseDraft, NumericInput};

#[tokio::test]
async fn test_added_expense_is_listed_unchanged() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    let id = add(&services, owner, "Lunch", 25.5, "Food", "2024-01-10").await?;

    let expenses = services.ledger.list_expenses(Some(owner)).await?;
    assert_eq!(expenses.len(), 1);
    let expense = &expenses[0];
    assert_eq!(expense.id, id);
    assert_eq!(expense.description, "Lunch");
    assert_eq!(expense.amount, 25.5);
    assert_eq!(expense.category, "Food");
    assert_eq!(
        expense.date.calendar(),
        NaiveDate::from_ymd_opt(2024, 1, 10)
    );
    assert_eq!(expense.owner_id, owner);
    Ok(())
}

#[tokio::test]
async fn test_list_orders_by_date_desc_then_insertion() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    let jan = add(&services, owner, "Jan", 1.0, "A", "2024-01-01").await?;
    let mar_first = add(&services, owner, "Mar 1", 2.0, "A", "2024-03-01").await?;
    let feb = add(&services, owner, "Feb", 3.0, "A", "2024-02-01").await?;
    let mar_second = add(&services, owner, "Mar 2", 4.0, "A", "2024-03-01").await?;

    let ids: Vec<_> = services
        .ledger
        .list_expenses(Some(owner))
        .await?
        .iter()
        .map(|e| e.id)
        .collect();

    assert_eq!(ids, vec![mar_first, mar_second, feb, jan]);
    Ok(())
}

#[tokio::test]
async fn test_list_is_filtered_by_owner() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let alice = register(&services, "alice@x.com").await?;
    let bob = register(&services, "bob@x.com").await?;

    add(&services, alice, "Alice lunch", 10.0, "Food", "2024-01-10").await?;
    add(&services, bob, "Bob lunch", 20.0, "Food", "2024-01-10").await?;

    let alice_expenses = services.ledger.list_expenses(Some(alice)).await?;
    assert_eq!(alice_expenses.len(), 1);
    assert_eq!(alice_expenses[0].description, "Alice lunch");

    let bob_totals = services.ledger.category_totals(Some(bob)).await?;
    assert_eq!(bob_totals.len(), 1);
    assert_eq!(bob_totals[0].total, 20.0);
    Ok(())
}

#[tokio::test]
async fn test_absent_or_unknown_owner_yields_empty_results() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;
    add(&services, owner, "Lunch", 25.5, "Food", "2024-01-10").await?;

    assert!(services.ledger.list_expenses(None).await?.is_empty());
    assert!(services.ledger.list_expenses(Some(999)).await?.is_empty());
    assert!(services.ledger.category_totals(None).await?.is_empty());
    assert!(services.ledger.category_totals(Some(999)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_category_totals_sum_and_order() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    add(&services, owner, "Bus", 2.5, "Transport", "2024-01-01").await?;
    add(&services, owner, "Lunch", 12.25, "Food", "2024-01-02").await?;
    add(&services, owner, "Dinner", 20.5, "Food", "2024-01-03").await?;
    add(&services, owner, "Cinema", 15.0, "Leisure", "2024-01-04").await?;
    add(&services, owner, "Taxi", 12.5, "Transport", "2024-01-05").await?;

    let totals = services.ledger.category_totals(Some(owner)).await?;
    let pairs: Vec<(&str, f64)> = totals
        .iter()
        .map(|t| (t.category.as_str(), t.total))
        .collect();

    // Leisure and Transport tie at 15.0 and fall back to name order
    assert_eq!(
        pairs,
        vec![("Food", 32.75), ("Leisure", 15.0), ("Transport", 15.0)]
    );
    Ok(())
}

#[tokio::test]
async fn test_category_totals_do_not_depend_on_insertion_order() -> Result<()> {
    let amounts = [4.5, 10.25, 0.75, 8.0];

    let (forward, _temp_forward) = test_services().await?;
    let owner = register(&forward, "a@x.com").await?;
    for amount in amounts {
        add(&forward, owner, "x", amount, "Food", "2024-01-01").await?;
    }

    let (backward, _temp_backward) = test_services().await?;
    let other = register(&backward, "a@x.com").await?;
    for amount in amounts.iter().rev() {
        add(&backward, other, "x", *amount, "Food", "2024-01-01").await?;
    }

    let forward_totals = forward.ledger.category_totals(Some(owner)).await?;
    let backward_totals = backward.ledger.category_totals(Some(other)).await?;

    assert_eq!(forward_totals, backward_totals);
    assert_eq!(forward_totals[0].total, 23.5);
    Ok(())
}

#[tokio::test]
async fn test_category_total_out_of_range_is_a_store_error() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    add(&services, owner, "Huge", 1e308, "Big", "2024-01-01").await?;
    add(&services, owner, "Huge again", 1e308, "Big", "2024-01-02").await?;

    let err = services
        .ledger
        .category_totals(Some(owner))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(err.to_string().contains("Big"));
    Ok(())
}

#[tokio::test]
async fn test_free_text_dates_are_listed_verbatim() -> Result<()> {
    let (services, temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;
    add(&services, owner, "Lunch", 25.5, "Food", "2024-01-10").await?;
    insert_raw_expense(&temp, owner, "Old bus", "10/01/2024").await?;

    let expenses = services.ledger.list_expenses(Some(owner)).await?;

    assert_eq!(expenses.len(), 2);
    let legacy = expenses
        .iter()
        .find(|e| e.description == "Old bus")
        .unwrap();
    assert_eq!(legacy.date, ExpenseDate::Legacy("10/01/2024".to_string()));
    assert_eq!(services.ledger.category_totals(Some(owner)).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_deleted_expenses_leave_the_totals() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    add(&services, owner, "Lunch", 10.0, "Food", "2024-01-01").await?;
    let dinner = add(&services, owner, "Dinner", 30.0, "Food", "2024-01-02").await?;

    services.ledger.remove_expense(dinner).await?;

    let totals = services.ledger.category_totals(Some(owner)).await?;
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, 10.0);
    Ok(())
}

#[tokio::test]
async fn test_remove_expense_is_idempotent() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;
    let id = add(&services, owner, "Lunch", 25.5, "Food", "2024-01-10").await?;

    let first = services.ledger.remove_expense(id).await?;
    let second = services.ledger.remove_expense(id).await?;

    assert!(first.deleted());
    assert_eq!(first.changes, 1);
    assert!(!second.deleted());
    assert_eq!(second.changes, 0);
    assert!(services.ledger.list_expenses(Some(owner)).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remove_expense_ignores_ownership() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let alice = register(&services, "alice@x.com").await?;
    register(&services, "bob@x.com").await?;
    let id = add(&services, alice, "Lunch", 25.5, "Food", "2024-01-10").await?;

    // Any caller holding the id can delete it.
    let removal = services.ledger.remove_expense(id).await?;

    assert!(removal.deleted());
    Ok(())
}

#[tokio::test]
async fn test_add_expense_accepts_numeric_strings() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    let draft = ExpenseDraft::new("Lunch", "25.5", "Food", "2024-01-10", owner.to_string());
    services.ledger.add_expense(draft).await?;

    let expenses = services.ledger.list_expenses(Some(owner)).await?;
    assert_eq!(expenses[0].amount, 25.5);
    Ok(())
}

#[tokio::test]
async fn test_add_expense_accepts_zero_as_text() -> Result<()> {
    let (services, _temp) = test_services().await?;
    let owner = register(&services, "a@x.com").await?;

    let draft = ExpenseDraft::new("Voided", "0", "Food", "2024-01-10", owner);
    services.ledger.add_expense(draft).await?;

    let expenses = services.ledger.list_expenses(Some(owner)).await?;
    assert_eq!(expenses[0].amount, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_add_expense_for_unknown_owner_is_a_store_error() -> Result<()> {
    let (services, _temp) = test_services().await?;

    let err = services
        .ledger
        .add_expense(ExpenseDraft::new("Lunch", 25.5, "Food", "2024-01-10", 42_i64))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    Ok(())
}

#[rstest]
#[case::no_description(ExpenseDraft { description: None, ..valid_draft() })]
#[case::blank_description(ExpenseDraft { description: Some("  ".into()), ..valid_draft() })]
#[case::no_amount(ExpenseDraft { amount: None, ..valid_draft() })]
#[case::zero_amount(ExpenseDraft { amount: Some(NumericInput::Integer(0)), ..valid_draft() })]
#[case::zero_float_amount(ExpenseDraft { amount: Some(NumericInput::Float(0.0)), ..valid_draft() })]
#[case::text_amount(ExpenseDraft { amount: Some("abc".into()), ..valid_draft() })]
#[case::no_category(ExpenseDraft { category: None, ..valid_draft() })]
#[case::no_date(ExpenseDraft { date: None, ..valid_draft() })]
#[case::bad_date(ExpenseDraft { date: Some("2024-13-40".into()), ..valid_draft() })]
#[case::no_owner(ExpenseDraft { owner_id: None, ..valid_draft() })]
#[case::zero_owner(ExpenseDraft { owner_id: Some(NumericInput::Integer(0)), ..valid_draft() })]
#[case::text_owner(ExpenseDraft { owner_id: Some("me".into()), ..valid_draft() })]
#[tokio::test]
async fn test_add_expense_rejects_invalid_drafts(#[case] draft: ExpenseDraft) -> Result<()> {
    let (services, _temp) = test_services().await?;
    register(&services, "a@x.com").await?;

    let err = services.ledger.add_expense(draft).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(services.ledger.list_expenses(Some(1)).await?.is_empty());
    Ok(())
}

fn valid_draft() -> ExpenseDraft {
    ExpenseDraft::new("Lunch", 25.5, "Food", "2024-01-10", 1_i64)
}
