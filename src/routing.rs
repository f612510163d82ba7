//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::{
    AppState,
    auth::{auth_guard, post_log_in},
    categories::get_categories,
    endpoints,
    logging::logging_middleware,
    register_user::register_user,
    stats::get_stats,
    transactions::{
        create_expense, create_income, delete_expense, delete_income, list_expenses, list_income,
        update_expense, update_income,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in));

    let protected_routes = Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses).post(create_expense),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense).delete(delete_expense),
        )
        .route(endpoints::INCOME, get(list_income).post(create_income))
        .route(
            endpoints::INCOME_ENTRY,
            put(update_income).delete(delete_income),
        )
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::STATS, get(get_stats))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;

    use crate::{endpoints, test_utils::get_test_server};

    #[tokio::test]
    async fn get_coffee_returns_teapot() {
        let (server, _) = get_test_server();

        server
            .get(endpoints::COFFEE)
            .await
            .assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn protected_routes_reject_unauthenticated_requests() {
        let (server, _) = get_test_server();

        for endpoint in [
            endpoints::EXPENSES,
            endpoints::INCOME,
            endpoints::CATEGORIES,
            endpoints::STATS,
        ] {
            server
                .get(endpoint)
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }
    }
}
