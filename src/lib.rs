pub mod api_routes;
pub mod api_state;
pub mod models;
pub mod repo;
pub mod service;
pub mod utils;

#[macro_use]
extern crate rocket;

use api_state::AppState;

pub fn build_rocket(state: AppState) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(state)
        .register(
            "/",
            catchers![api_routes::unauthorized, api_routes::default_catcher],
        )
        .mount(
            "/api",
            routes![
                api_routes::create_log,
                api_routes::list_logs,
                api_routes::list_log_page,
                api_routes::health_check,
            ],
        )
}
