use crate::conf::{Conf, Migration};
use anyhow::Result;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::{
    fs::{create_dir_all, remove_file},
    path::Path,
    process::exit,
};
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum DbVersion {
    Specific(i16),
    Latest,
}

pub fn cli(args: &[String]) {
    let first_arg = args.first().unwrap_or_else(|| {
        error!("No args provided");
        exit(1);
    });

    match first_arg.as_str() {
        "drop" => drop().unwrap_or_else(|e| {
            error!(%e, "Unable to drop database");
            exit(1);
        }),
        "migrate" => {
            let version = match args.get(1) {
                Some(version) => match version.parse::<i16>() {
                    Ok(version) => DbVersion::Specific(version),
                    Err(e) => {
                        error!(%e, version, "Invalid schema version");
                        exit(1);
                    }
                },
                None => DbVersion::Latest,
            };
            let pool = pool().unwrap_or_else(|e| {
                error!(%e, "Unable to open database");
                exit(1);
            });
            migrate(&mut pool.get().unwrap(), version).unwrap_or_else(|e| {
                error!(%e, "Migration failed");
                exit(1);
            });
        }
        _ => {
            error!(?args, "Unknown argument");
            exit(1);
        }
    };
}

fn drop() -> Result<()> {
    warn!("Dropping database...");
    let db_url = Conf::new()?.db_url;
    info!(%db_url);
    remove_file(db_url)?;
    warn!("Database has been dropped");
    Ok(())
}

pub fn migrate_to_latest(conn: &mut Connection) -> Result<()> {
    migrate(conn, DbVersion::Latest)
}

pub fn migrate(conn: &mut Connection, target_version: DbVersion) -> Result<()> {
    let current_version = schema_version(conn)?;
    info!(?current_version, ?target_version, "Migrating db schema");

    let migrations = Conf::new()?.migrations;
    info!(count = migrations.len(), "Loaded migrations");

    let target_version = match target_version {
        DbVersion::Latest => {
            migrations
                .iter()
                .max_by_key(|it| it.version)
                .unwrap()
                .version
        }
        DbVersion::Specific(v) => v,
    };

    if current_version == target_version {
        info!("Schema is up to date");
    } else if current_version < target_version {
        info!("Schema is outdated, updating...");
        let migrations: Vec<Migration> = migrations
            .iter()
            .filter(|it| it.version > current_version && it.version <= target_version)
            .cloned()
            .collect();
        warn!(count = migrations.len(), "Found pending migrations");
        for migr in migrations {
            info!(%migr.version, sql = &migr.up.trim(), "Updating schema");
            conn.execute_batch(&migr.up)?;
            conn.execute_batch(&format!("PRAGMA user_version={}", migr.version))?;
        }
    } else {
        info!("Downgrading the schema...");
        let migrations: Vec<Migration> = migrations
            .iter()
            .filter(|it| it.version > target_version && it.version <= current_version)
            .cloned()
            .collect();
        warn!(count = migrations.len(), "Found pending migrations");
        for migr in migrations.iter().rev() {
            info!(
                from = migr.version,
                to = migr.version - 1,
                sql = &migr.down.trim(),
                "Downgrading schema"
            );
            conn.execute_batch(&migr.down)?;
            conn.execute_batch(&format!("PRAGMA user_version={}", migr.version - 1))?;
        }
    }

    Ok(())
}

pub fn pool() -> Result<Pool<SqliteConnectionManager>> {
    let db_url = Conf::new()?.db_url;
    if let Some(dir) = Path::new(&db_url).parent() {
        if !dir.as_os_str().is_empty() {
            create_dir_all(dir)?;
        }
    }
    let manager = SqliteConnectionManager::file(db_url);
    Ok(Pool::new(manager)?)
}

fn schema_version(conn: &Connection) -> rusqlite::Result<i16> {
    conn.query_row("SELECT user_version FROM pragma_user_version", [], |row| {
        row.get(0)
    })
}
