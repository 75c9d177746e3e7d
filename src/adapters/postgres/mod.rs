//! PostgreSQL implementations of the persistence ports.

mod community;
mod course_catalog;
mod order_repository;
mod profile_store;
mod purchase_ledger;

pub use community::{
    PostgresCollaborationInbox, PostgresContactInbox, PostgresNewsletterList,
};
pub use course_catalog::PostgresCourseCatalog;
pub use order_repository::PostgresOrderRepository;
pub use profile_store::PostgresProfileStore;
pub use purchase_ledger::PostgresPurchaseLedger;
