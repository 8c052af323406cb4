use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
};

use crate::{
    dto::orders::AddItemRequest,
    entity::{
        order_status_history::ActiveModel as HistoryActive,
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        order_items::ActiveModel as OrderItemActive,
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Order, OrderLine, OrderStatus, OrderSummary, PaymentMethod},
    state::AppState,
};

/// Insert a fresh pending order with an empty total.
pub async fn create_order(state: &AppState, user_id: i32) -> AppResult<Order> {
    let order = OrderActive {
        id: NotSet,
        user_id: Set(user_id),
        status: Set(OrderStatus::Pending.as_str().to_owned()),
        total_price: Set(0),
        order_date: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(order_from_entity(order))
}

/// Add one line to an order: stock check, price snapshot, total recompute and
/// stock decrement, all inside a single transaction with the contended rows
/// locked. A failed check rolls everything back.
pub async fn add_item(
    state: &AppState,
    order_id: i32,
    payload: AddItemRequest,
) -> AppResult<Order> {
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }

    let txn = state.orm.begin().await?;

    // Lock ordering is always order before product.
    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let product = Products::find_by_id(payload.product_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if product.stock < payload.quantity {
        return Err(AppError::InsufficientStock {
            available: product.stock,
        });
    }

    OrderItemActive {
        id: NotSet,
        order_id: Set(order.id),
        product_id: Set(product.id),
        quantity: Set(payload.quantity),
        price: Set(product.price),
    }
    .insert(&txn)
    .await?;

    // The total is always recomputed from the item rows, never adjusted
    // incrementally.
    let backend = txn.get_database_backend();
    txn.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE orders SET total_price = \
         (SELECT COALESCE(SUM(quantity * price), 0) FROM order_items WHERE order_id = $1) \
         WHERE order_id = $2",
        [order.id.into(), order.id.into()],
    ))
    .await?;

    Products::update_many()
        .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(payload.quantity))
        .filter(ProdCol::Id.eq(product.id))
        .exec(&txn)
        .await?;

    let updated = Orders::find_by_id(order.id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    txn.commit().await?;

    Ok(order_from_entity(updated))
}

/// The customer's own orders, newest first.
pub async fn list_orders_for_user(state: &AppState, user_id: i32) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_desc(OrderCol::OrderDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(orders)
}

/// Item lines of one order joined with product names.
pub async fn order_lines(state: &AppState, order_id: i32) -> AppResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        r#"
        SELECT p.name AS product_name, oi.quantity, oi.price
        FROM order_items oi
        JOIN products p ON oi.product_id = p.product_id
        WHERE oi.order_id = $1
        ORDER BY oi.order_item_id
        "#,
    )
    .bind(order_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(lines)
}

/// Every order joined with its customer name, newest first. The optional
/// status filter serves the manager's pending-orders view.
pub async fn list_all_orders(
    state: &AppState,
    status: Option<OrderStatus>,
) -> AppResult<Vec<OrderSummary>> {
    const BASE: &str = r#"
        SELECT o.order_id, u.name AS customer_name, o.status, o.total_price, o.order_date
        FROM orders o
        JOIN users u ON o.user_id = u.user_id
    "#;

    let summaries = match status {
        Some(status) => {
            let sql = format!("{BASE} WHERE o.status = $1 ORDER BY o.order_date DESC");
            sqlx::query_as::<_, OrderSummary>(&sql)
                .bind(status.as_str())
                .fetch_all(&state.pool)
                .await?
        }
        None => {
            let sql = format!("{BASE} ORDER BY o.order_date DESC");
            sqlx::query_as::<_, OrderSummary>(&sql)
                .fetch_all(&state.pool)
                .await?
        }
    };

    Ok(summaries)
}

/// Set an order's status. A history row is appended only when the stored
/// status actually changes; the status column itself is written either way.
pub async fn set_status(
    state: &AppState,
    order_id: i32,
    new_status: OrderStatus,
) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if order.status != new_status.as_str() {
        record_status_change(&txn, order.id, new_status).await?;
    }

    let mut active: OrderActive = order.into();
    active.status = Set(new_status.as_str().to_owned());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(())
}

/// Manager approval: the one permitted transition is processing -> completed.
/// The pre-transition check doubles as the duplicate-history guard, so
/// re-approving a completed order cannot append a second row.
pub async fn approve(state: &AppState, order_id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if order.status != OrderStatus::Processing.as_str() {
        return Err(AppError::BadRequest(format!(
            "order is not awaiting approval (status: {})",
            order.status
        )));
    }

    record_status_change(&txn, order.id, OrderStatus::Completed).await?;

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Completed.as_str().to_owned());
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(())
}

/// Customer payment. Ownership and the pending state are checked under a row
/// lock; a wrong owner is indistinguishable from a missing order. No payment
/// provider is called: the method only shapes the confirmation.
pub async fn pay_order(
    state: &AppState,
    order_id: i32,
    user_id: i32,
    method: PaymentMethod,
) -> AppResult<Order> {
    let txn = state.orm.begin().await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(order_id))
                .add(OrderCol::UserId.eq(user_id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if order.status != OrderStatus::Pending.as_str() {
        return Err(AppError::BadRequest(
            "order is already paid or canceled".into(),
        ));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Processing.as_str().to_owned());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = order.id, method = method.as_str(), "payment accepted");

    Ok(order_from_entity(order))
}

async fn record_status_change(
    txn: &sea_orm::DatabaseTransaction,
    order_id: i32,
    new_status: OrderStatus,
) -> AppResult<()> {
    HistoryActive {
        id: NotSet,
        order_id: Set(order_id),
        new_status: Set(new_status.as_str().to_owned()),
        changed_at: NotSet,
    }
    .insert(txn)
    .await?;

    Ok(())
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        status: model.status,
        total_price: model.total_price,
        order_date: model.order_date.with_timezone(&Utc),
    }
}
