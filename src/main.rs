use crate::{
    conf::Conf,
    model::ApiError,
    provider::{CoinGecko, Provider},
    repository::{ExchangeRateRepository, RateHistoryRepository},
};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rocket::{
    catch, catchers,
    fairing::AdHoc,
    http::{Header, Status},
    routes, Build, Request, Rocket,
};
use std::{env, process::exit};
use tracing::error;

mod conf;
mod controller;
mod db;
mod model;
mod page;
mod provider;
mod repository;
mod service;
#[cfg(test)]
mod test;

#[rocket::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str).unwrap_or("serve") {
        "serve" => serve().await,
        "db" => db::cli(&args[1..]),
        "sync" => service::refresh::cli(&args[1..]).await,
        "page" => page::cli(&args[1..]).await,
        _ => {
            error!(?args, "Unknown command");
            exit(1);
        }
    }
}

async fn serve() {
    let conf = Conf::new().unwrap_or_else(|e| {
        error!(%e, "Unable to load conf");
        exit(1);
    });
    let pool = db::pool().unwrap_or_else(|e| {
        error!(%e, "Unable to open database");
        exit(1);
    });
    db::migrate_to_latest(&mut pool.get().unwrap()).unwrap_or_else(|e| {
        error!(%e, "Unable to migrate database");
        exit(1);
    });
    let provider: Box<dyn Provider> = Box::new(CoinGecko::new(conf.providers.coingecko));

    if let Err(e) = prepare(rocket::build(), pool, provider).launch().await {
        error!(%e, "Unable to launch rocket");
        exit(1);
    }
}

pub fn prepare(
    rocket: Rocket<Build>,
    pool: Pool<SqliteConnectionManager>,
    provider: Box<dyn Provider>,
) -> Rocket<Build> {
    rocket
        .mount(
            "/",
            routes![
                controller::refresh::get,
                controller::refresh::post,
                controller::refresh::preflight,
                controller::rates::get_all,
                controller::rates::get_one,
                controller::rates::get_history,
            ],
        )
        .register("/", catchers![catch_default])
        .manage(ExchangeRateRepository::new(pool.clone()))
        .manage(RateHistoryRepository::new(pool))
        .manage(provider)
        .attach(cors())
}

// The page is served from a different origin than the rates service
fn cors() -> AdHoc {
    AdHoc::on_response("CORS", |_, res| {
        Box::pin(async move {
            res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
            res.set_header(Header::new(
                "Access-Control-Allow-Methods",
                "GET, POST, PUT, DELETE, OPTIONS",
            ));
            res.set_header(Header::new(
                "Access-Control-Allow-Headers",
                "Content-Type, Authorization, X-Client-Info, Apikey",
            ));
        })
    })
}

#[catch(default)]
fn catch_default(status: Status, _req: &Request) -> ApiError {
    status.into()
}
