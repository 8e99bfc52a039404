pub mod builders;
pub mod columns;
pub mod conditions;
pub mod query;
pub mod values;

pub use self::columns::Column;
pub use self::conditions::{AttrValue, Bindings, Condition};
pub use self::query::{Limit, SelectQuery};
pub use self::values::Value;
