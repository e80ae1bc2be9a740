//! corebank - Banking Administration REST Backend
//!
//! REST API server for a banking administration system: catalog tables,
//! branches, account holders, accounts, account ownership, ledger movements
//! (deposits, withdrawals, transfers) and loans with installment
//! calculation.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Money**: rust_decimal end-to-end, NUMERIC(15,2) columns
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations (schema + type-catalog seeds)
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use corebank::{config, db, handlers};

use tracing_subscriber::EnvFilter;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Catalog routes: cities
        .route("/api/v1/cities", post(handlers::catalogs::create_city))
        .route("/api/v1/cities", get(handlers::catalogs::list_cities))
        .route("/api/v1/cities/{id}", get(handlers::catalogs::get_city))
        .route("/api/v1/cities/{id}", put(handlers::catalogs::update_city))
        .route(
            "/api/v1/cities/{id}",
            delete(handlers::catalogs::delete_city),
        )
        // Catalog routes: document types
        .route(
            "/api/v1/types/document",
            post(handlers::catalogs::create_document_type),
        )
        .route(
            "/api/v1/types/document",
            get(handlers::catalogs::list_document_types),
        )
        .route(
            "/api/v1/types/document/{id}",
            get(handlers::catalogs::get_document_type),
        )
        .route(
            "/api/v1/types/document/{id}",
            put(handlers::catalogs::update_document_type),
        )
        .route(
            "/api/v1/types/document/{id}",
            delete(handlers::catalogs::delete_document_type),
        )
        // Catalog routes: account types
        .route(
            "/api/v1/types/account",
            post(handlers::catalogs::create_account_type),
        )
        .route(
            "/api/v1/types/account",
            get(handlers::catalogs::list_account_types),
        )
        .route(
            "/api/v1/types/account/{id}",
            get(handlers::catalogs::get_account_type),
        )
        .route(
            "/api/v1/types/account/{id}",
            put(handlers::catalogs::update_account_type),
        )
        .route(
            "/api/v1/types/account/{id}",
            delete(handlers::catalogs::delete_account_type),
        )
        // Catalog routes: movement types
        .route(
            "/api/v1/types/movement",
            post(handlers::catalogs::create_movement_type),
        )
        .route(
            "/api/v1/types/movement",
            get(handlers::catalogs::list_movement_types),
        )
        .route(
            "/api/v1/types/movement/{id}",
            get(handlers::catalogs::get_movement_type),
        )
        .route(
            "/api/v1/types/movement/{id}",
            put(handlers::catalogs::update_movement_type),
        )
        .route(
            "/api/v1/types/movement/{id}",
            delete(handlers::catalogs::delete_movement_type),
        )
        // Catalog routes: branch types
        .route(
            "/api/v1/types/branch",
            post(handlers::catalogs::create_branch_type),
        )
        .route(
            "/api/v1/types/branch",
            get(handlers::catalogs::list_branch_types),
        )
        .route(
            "/api/v1/types/branch/{id}",
            get(handlers::catalogs::get_branch_type),
        )
        .route(
            "/api/v1/types/branch/{id}",
            put(handlers::catalogs::update_branch_type),
        )
        .route(
            "/api/v1/types/branch/{id}",
            delete(handlers::catalogs::delete_branch_type),
        )
        // Branch routes
        .route("/api/v1/branches", post(handlers::branches::create_branch))
        .route("/api/v1/branches", get(handlers::branches::list_branches))
        .route(
            "/api/v1/branches/{id}",
            get(handlers::branches::get_branch),
        )
        .route(
            "/api/v1/branches/{id}",
            put(handlers::branches::update_branch),
        )
        .route(
            "/api/v1/branches/{id}",
            delete(handlers::branches::delete_branch),
        )
        .route(
            "/api/v1/branches/city/{city_id}",
            get(handlers::branches::list_branches_by_city),
        )
        // Holder routes
        .route("/api/v1/holders", post(handlers::holders::create_holder))
        .route("/api/v1/holders", get(handlers::holders::list_holders))
        .route("/api/v1/holders/{id}", get(handlers::holders::get_holder))
        .route(
            "/api/v1/holders/{id}",
            put(handlers::holders::update_holder),
        )
        .route(
            "/api/v1/holders/{id}",
            delete(handlers::holders::delete_holder),
        )
        .route(
            "/api/v1/holders/document/{document}",
            get(handlers::holders::get_holder_by_document),
        )
        // Account routes
        .route("/api/v1/accounts", post(handlers::accounts::create_account))
        .route("/api/v1/accounts", get(handlers::accounts::list_accounts))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account),
        )
        .route(
            "/api/v1/accounts/{id}",
            put(handlers::accounts::update_account),
        )
        .route(
            "/api/v1/accounts/{id}",
            delete(handlers::accounts::delete_account),
        )
        .route(
            "/api/v1/accounts/number/{number}",
            get(handlers::accounts::get_account_by_number),
        )
        .route(
            "/api/v1/accounts/{id}/balance",
            get(handlers::accounts::get_account_balance),
        )
        .route(
            "/api/v1/accounts/branch/{branch_id}",
            get(handlers::accounts::list_accounts_by_branch),
        )
        // Ownership routes
        .route("/api/v1/owners", post(handlers::ownership::create_owner))
        .route(
            "/api/v1/owners/{account_id}/{holder_id}",
            delete(handlers::ownership::delete_owner),
        )
        .route(
            "/api/v1/owners/account/{account_id}",
            get(handlers::ownership::list_owners_by_account),
        )
        .route(
            "/api/v1/owners/holder/{holder_id}",
            get(handlers::ownership::list_accounts_by_holder),
        )
        // Movement routes (the ledger engine sits behind the first three)
        .route(
            "/api/v1/movements/deposit",
            post(handlers::movements::create_deposit),
        )
        .route(
            "/api/v1/movements/withdrawal",
            post(handlers::movements::create_withdrawal),
        )
        .route(
            "/api/v1/movements/transfer",
            post(handlers::movements::create_transfer),
        )
        .route(
            "/api/v1/movements",
            get(handlers::movements::list_movements),
        )
        .route(
            "/api/v1/movements/{id}",
            get(handlers::movements::get_movement),
        )
        .route(
            "/api/v1/movements/{id}",
            put(handlers::movements::update_movement),
        )
        .route(
            "/api/v1/movements/account/{account_id}",
            get(handlers::movements::list_movements_by_account),
        )
        .route(
            "/api/v1/movements/range/{start}/{end}",
            get(handlers::movements::list_movements_by_range),
        )
        // Loan routes
        .route(
            "/api/v1/loans/quote",
            post(handlers::loans::quote_installment),
        )
        .route("/api/v1/loans", post(handlers::loans::create_loan))
        .route("/api/v1/loans", get(handlers::loans::list_loans))
        .route("/api/v1/loans/{id}", get(handlers::loans::get_loan))
        .route("/api/v1/loans/{id}", put(handlers::loans::update_loan))
        .route("/api/v1/loans/{id}", delete(handlers::loans::delete_loan))
        .route(
            "/api/v1/loans/number/{number}",
            get(handlers::loans::get_loan_by_number),
        )
        .route(
            "/api/v1/loans/account/{account_id}",
            get(handlers::loans::list_loans_by_account),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // The administration UI is served from another origin
        .layer(CorsLayer::permissive())
        // Share database pool with all handlers via State extraction
        .with_state(pool);

    // Bind to network address and start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
