//! Domain engine for the mess backend.
//!
//! The [`Engine`] owns the record store connection and exposes every
//! operation the HTTP layer needs: menu, attendance, expense and student
//! CRUD plus the expense summary.

pub use attendance::{Attendance, AttendanceStatus};
pub use calendar::{MealType, Weekday, day_window};
pub use error::EngineError;
pub use expenses::{Expense, ExpenseCategory};
pub use menus::Menu;
pub use money::Amount;
pub use ops::{
    AttendanceNew, CategoryTotal, Engine, EngineBuilder, ExpenseNew, ExpenseSummary,
    ExpenseUpdate, MenuNew, MenuUpdate, StudentNew,
};
pub use students::Student;

mod attendance;
mod calendar;
mod error;
mod expenses;
mod menus;
mod money;
mod ops;
mod students;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
