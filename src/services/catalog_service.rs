use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

pub async fn add_product(state: &AppState, payload: CreateProductRequest) -> AppResult<Product> {
    validate_price_and_stock(payload.price, payload.stock)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name must not be empty".into()));
    }

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name.trim().to_owned()),
        price: Set(payload.price),
        stock: Set(payload.stock),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    Ok(product_from_entity(product))
}

/// Overwrite price and stock for an existing product. An unknown id is a
/// silent no-op.
pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<()> {
    validate_price_and_stock(payload.price, payload.stock)?;

    Products::update_many()
        .col_expr(Column::Price, Expr::value(payload.price))
        .col_expr(Column::Stock, Expr::value(payload.stock))
        .filter(Column::Id.eq(id))
        .exec(&state.orm)
        .await?;

    Ok(())
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let products = Products::find()
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(products)
}

fn validate_price_and_stock(price: i64, stock: i32) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }
    Ok(())
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
