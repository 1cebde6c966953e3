//! Resource models
//!
//! Typed representations of the API objects this client works with, and the
//! request bodies used to create or update them. Field names follow the
//! API's camelCase; `_links` is exposed through [`ResourceLinks`].

mod common;
mod customer;
mod payment;
mod refund;

pub use common::{Amount, LinkMap, ResourceLinks};
pub use customer::{CreateCustomerParams, Customer, UpdateCustomerParams};
pub use payment::{CreatePaymentParams, Payment, PaymentStatus, UpdatePaymentParams};
pub use refund::{CreateRefundParams, Refund, RefundStatus};
