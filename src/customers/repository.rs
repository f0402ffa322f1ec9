// Database access for customers

use sqlx::PgPool;

use crate::bicycles::models::Bicycle;
use crate::customers::models::{
    CreateCustomer, Customer, CustomerListParams, CustomerWithBicycles, UpdateCustomer,
};
use crate::db;
use crate::error::ApiError;
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};

/// List customers, newest first, with optional search over name, phone,
/// and email
pub async fn list_customers(
    pool: &PgPool,
    params: CustomerListParams,
) -> Result<Paginated<Customer>, ApiError> {
    let (limit, offset) = pagination_or(params.limit, params.offset, 10);

    let mut builder = SqlQueryBuilder::new("customers");
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        builder.add_search(&["name", "phone", "email"], search.trim());
    }
    builder.set_order("created_at DESC");
    builder.set_pagination(limit, offset);

    let (count_sql, count_params) = builder.build_count();
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for param in &count_params {
        count_query = count_query.bind(param);
    }
    let total = count_query.fetch_one(pool).await?;

    let (sql, query_params) = builder.build();
    let mut query = sqlx::query_as::<_, Customer>(&sql);
    for param in &query_params {
        query = query.bind(param);
    }
    let items = query.fetch_all(pool).await?;

    Ok(Paginated {
        total,
        items,
        limit,
        offset,
    })
}

/// Fetch a single customer by id
pub async fn get_customer(pool: &PgPool, id: i32) -> Result<Customer, ApiError> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

/// Fetch a customer together with their registered bicycles
pub async fn get_customer_with_bicycles(
    pool: &PgPool,
    id: i32,
) -> Result<CustomerWithBicycles, ApiError> {
    let customer = get_customer(pool, id).await?;

    let bicycles = sqlx::query_as::<_, Bicycle>(
        "SELECT * FROM bicycles WHERE customer_id = $1 ORDER BY created_at DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(CustomerWithBicycles { customer, bicycles })
}

/// Insert a new customer; the phone number must be unique
pub async fn create_customer(pool: &PgPool, payload: CreateCustomer) -> Result<Customer, ApiError> {
    if db::customer_phone_exists(pool, &payload.phone).await? {
        return Err(ApiError::Conflict {
            message: "Customer with this phone number already exists".to_string(),
        });
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (name, phone, email, address, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(&payload.email)
    .bind(&payload.address)
    .bind(&payload.notes)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // The unique constraint catches the race the existence check misses
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return ApiError::Conflict {
                    message: "Customer with this phone number already exists".to_string(),
                };
            }
        }
        ApiError::DatabaseError(e)
    })?;

    Ok(customer)
}

/// Apply a partial update; omitted fields keep their prior values and
/// explicit nulls clear nullable fields
pub async fn update_customer(
    pool: &PgPool,
    id: i32,
    payload: UpdateCustomer,
) -> Result<Customer, ApiError> {
    let existing = get_customer(pool, id).await?;

    if let Some(phone) = &payload.phone {
        if db::customer_phone_exists_excluding_id(pool, phone, id).await? {
            return Err(ApiError::Conflict {
                message: "Customer with this phone number already exists".to_string(),
            });
        }
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers
        SET name = $1, phone = $2, email = $3, address = $4, notes = $5, updated_at = NOW()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(payload.name.unwrap_or(existing.name))
    .bind(payload.phone.unwrap_or(existing.phone))
    .bind(payload.email.unwrap_or(existing.email))
    .bind(payload.address.unwrap_or(existing.address))
    .bind(payload.notes.unwrap_or(existing.notes))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(customer)
}

/// Delete a customer; bicycles and repair orders cascade at the database level
pub async fn delete_customer(pool: &PgPool, id: i32) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Customer", id));
    }

    Ok(())
}
