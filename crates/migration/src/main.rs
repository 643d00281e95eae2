use sea_orm::Database;
use sea_orm_migration::prelude::*;

const USAGE: &str = "Usage: migration [up|down|fresh|status] [database-url]";

/// `MESS_DATABASE_URL` wins over the generic `DATABASE_URL`.
fn database_url(arg: Option<String>) -> String {
    arg.or_else(|| std::env::var("MESS_DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./mess.db?mode=rwc".to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());
    let db_url = database_url(args.next());

    let db = Database::connect(&db_url).await?;

    match cmd.as_str() {
        "up" => {
            migration::Migrator::up(&db, None).await?;
            println!("mess schema is up to date ({db_url})");
        }
        "down" => migration::Migrator::down(&db, Some(1)).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => migration::Migrator::status(&db).await?,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
