//! Ports - trait contracts between the application core and the outside
//! world. Adapters implement these; handlers depend only on the traits.

mod community;
mod course_catalog;
mod mailer;
mod order_repository;
mod payment_gateway;
mod profile_store;
mod purchase_ledger;
mod token_verifier;
mod user_directory;

pub use community::{CollaborationInbox, ContactInbox, NewsletterList};
pub use course_catalog::CourseCatalog;
pub use mailer::{EmailMessage, Mailer, MailerError};
pub use order_repository::OrderRepository;
pub use payment_gateway::{GatewayOrder, GatewayOrderRequest, PaymentGateway, PaymentGatewayError};
pub use profile_store::ProfileStore;
pub use purchase_ledger::PurchaseLedger;
pub use token_verifier::{TokenIssuer, TokenVerifier};
pub use user_directory::{DirectoryError, DirectoryUser, NewDirectoryUser, UserDirectory};
