//! Record services
//!
//! Thin glue composing the paginator and the access policy per entity type.
//! Services are built by explicit dependency passing: a store handle and a
//! policy go in through the constructor, nothing is process-global.
//!
//! The access policy is enforced before the store is touched: listings are
//! pre-filtered through the principal's scope filter, point reads and
//! mutations run the decision function first, and creation-time invariants
//! (a FamilyParent only ever creates members of their own family) override
//! whatever the request body claims.

mod errors;
mod families;
mod records;
mod users;

pub use errors::{ServiceError, ServiceResult};
pub use families::FamilyService;
pub use records::RecordService;
pub use users::UserService;
