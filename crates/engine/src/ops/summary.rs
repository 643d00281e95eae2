use sea_orm::{FromQueryResult, QuerySelect, Statement, TransactionTrait, prelude::*};

use crate::{Amount, ExpenseCategory, ResultEngine, expenses};

use super::{Engine, with_tx};

/// Sum of expense amounts for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Amount,
}

/// Per-category breakdown and grand total over all expenses.
///
/// `total` always equals the sum of `by_category` totals. Categories without
/// expenses are omitted; the order of `by_category` is unspecified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseSummary {
    pub by_category: Vec<CategoryTotal>,
    pub total: Amount,
}

#[derive(Debug, FromQueryResult)]
struct CategorySumRow {
    category: String,
    total_minor: i64,
}

impl Engine {
    /// Compute the expense summary.
    ///
    /// Two aggregation passes run over the expense table: one grouped by
    /// category, one ungrouped. Both run inside the same read transaction so
    /// they observe a single snapshot even while other requests write.
    pub async fn expense_summary(&self) -> ResultEngine<ExpenseSummary> {
        with_tx!(self, |db_tx| {
            let rows = expenses::Entity::find()
                .select_only()
                .column(expenses::Column::Category)
                .column_as(expenses::Column::AmountMinor.sum(), "total_minor")
                .group_by(expenses::Column::Category)
                .into_model::<CategorySumRow>()
                .all(&db_tx)
                .await?;

            let backend = db_tx.get_database_backend();
            let stmt = Statement::from_string(
                backend,
                "SELECT COALESCE(SUM(amount_minor), 0) AS total_minor FROM expenses",
            );
            let total_minor: i64 = db_tx
                .query_one(stmt)
                .await?
                .map(|row| row.try_get("", "total_minor"))
                .transpose()?
                .unwrap_or(0);

            let mut by_category = Vec::with_capacity(rows.len());
            for row in rows {
                by_category.push(CategoryTotal {
                    category: ExpenseCategory::try_from(row.category.as_str())?,
                    total: Amount::total_from_minor(row.total_minor)?,
                });
            }

            tracing::debug!(
                categories = by_category.len(),
                total_minor,
                "expense summary computed"
            );

            Ok(ExpenseSummary {
                by_category,
                total: Amount::total_from_minor(total_minor)?,
            })
        })
    }
}
