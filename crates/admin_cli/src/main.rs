use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, StudentNew};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "mess_admin")]
#[command(about = "Admin utilities for the mess backend (schema, students, reports)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./mess.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and exit.
    Migrate,
    /// Print the expense summary.
    Summary,
    Student(Student),
}

#[derive(Args, Debug)]
struct Student {
    #[command(subcommand)]
    command: StudentCommand,
}

#[derive(Subcommand, Debug)]
enum StudentCommand {
    Add(StudentAddArgs),
    List,
    Delete(StudentDeleteArgs),
}

#[derive(Args, Debug)]
struct StudentAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long = "class")]
    class_name: String,
    #[arg(long = "room")]
    room_number: String,
}

#[derive(Args, Debug)]
struct StudentDeleteArgs {
    /// Record id as printed by `student list`.
    id: Uuid,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Migrate => println!("schema is up to date"),
        Command::Summary => {
            let summary = engine.expense_summary().await?;
            for row in &summary.by_category {
                println!("{:<14} {:>12}", row.category.as_str(), row.total.to_string());
            }
            println!("{:<14} {:>12}", "Total", summary.total.to_string());
        }
        Command::Student(Student {
            command: StudentCommand::Add(args),
        }) => {
            let student = engine
                .add_student(StudentNew {
                    name: args.name,
                    email: args.email,
                    class_name: args.class_name,
                    room_number: args.room_number,
                })
                .await?;
            println!("created student: {} ({})", student.name, student.student_id);
        }
        Command::Student(Student {
            command: StudentCommand::List,
        }) => {
            for student in engine.list_students().await? {
                println!(
                    "{}  {}  {:<24} {:<8} {}",
                    student.id, student.student_id, student.name, student.class_name, student.room_number
                );
            }
        }
        Command::Student(Student {
            command: StudentCommand::Delete(args),
        }) => {
            engine.delete_student(args.id).await?;
            println!("deleted student: {}", args.id);
        }
    }

    Ok(())
}
