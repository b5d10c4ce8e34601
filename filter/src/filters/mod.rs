//! Query filter system
//!
//! Turns `name[method]=value` query-string pairs into typed, validated
//! filters that render as SQL clause fragments or document-store predicates.
//!
//! ## Usage
//!
//! ```
//! use rqp_filter::filters::{Filter, SqlParams, Validations};
//!
//! let validations = Validations::new().declare("id:int", None).unwrap();
//! let filter = Filter::new("id[in]", "5,6,7", ',', &validations).unwrap();
//!
//! let mut params = SqlParams::default();
//! assert_eq!(filter.to_sql(&mut params).unwrap(), "id IN (?,?,?)");
//! assert_eq!(params.len(), 3);
//! assert_eq!(
//!     filter.to_document().unwrap(),
//!     serde_json::json!({ "$in": [5, 6, 7] })
//! );
//! ```

mod document;
mod key;
mod method;
mod parser;
mod sql;
mod types;
mod validation;
pub mod validators;
mod value;

pub use key::parse_key;
pub use method::Method;
pub use parser::FilterParser;
pub use sql::SqlParams;
pub use types::{Filter, OrState};
pub use validation::{Declarator, FieldType, Validations, Validator};
pub use value::{FilterValue, ObjectId, Scalar, coerce};
