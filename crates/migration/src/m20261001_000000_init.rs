//! Initial schema migration.
//!
//! Creates the mess collections:
//!
//! - `menus`: weekly menu entries (day × meal → items)
//! - `attendance`: per-meal presence marks
//! - `expenses`: kitchen spending, amounts stored in minor units

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Upper bound for a single `expenses.amount_minor`, in cents.
const MAX_AMOUNT_MINOR: i64 = 10_000_000_000_000;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Menus {
    Table,
    Id,
    Day,
    DayIndex,
    MealType,
    MealIndex,
    Items,
    CreatedAt,
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    StudentName,
    StudentNameNorm,
    ClassName,
    RoomNumber,
    Date,
    Status,
    MealType,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Category,
    AmountMinor,
    Description,
    Date,
    RecordedBy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Menus
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Menus::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(Menus::Day).string().not_null())
                    .col(ColumnDef::new(Menus::DayIndex).small_integer().not_null())
                    .col(ColumnDef::new(Menus::MealType).string().not_null())
                    .col(ColumnDef::new(Menus::MealIndex).small_integer().not_null())
                    .col(ColumnDef::new(Menus::Items).json().not_null())
                    .col(ColumnDef::new(Menus::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-menus-day_index-meal_index")
                    .table(Menus::Table)
                    .col(Menus::DayIndex)
                    .col(Menus::MealIndex)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Attendance
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentName).string().not_null())
                    .col(
                        ColumnDef::new(Attendance::StudentNameNorm)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::ClassName).string().not_null())
                    .col(ColumnDef::new(Attendance::RoomNumber).string().not_null())
                    .col(ColumnDef::new(Attendance::Date).timestamp().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::MealType).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attendance-date")
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attendance-student_name_norm")
                    .table(Attendance::Table)
                    .col(Attendance::StudentNameNorm)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null()
                            .check(
                                Expr::col(Expenses::AmountMinor)
                                    .gte(0)
                                    .and(Expr::col(Expenses::AmountMinor).lte(MAX_AMOUNT_MINOR)),
                            ),
                    )
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::RecordedBy).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-category")
                    .table(Expenses::Table)
                    .col(Expenses::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Menus::Table).to_owned())
            .await?;
        Ok(())
    }
}
