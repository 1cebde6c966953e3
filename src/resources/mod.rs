//! Resource binders
//!
//! One binder per collection, each a thin typed layer over [`Binder`]:
//!
//! | Binder                     | Path                                   |
//! |----------------------------|----------------------------------------|
//! | [`PaymentsBinder`]         | `payments`                             |
//! | [`CustomersBinder`]        | `customers`                            |
//! | [`PaymentRefundsBinder`]   | `payments/{payment_id}/refunds`        |
//! | [`CustomerPaymentsBinder`] | `customers/{customer_id}/payments`     |

mod binder;
mod customers;
mod params;
mod payments;
mod refunds;

pub use binder::Binder;
pub use customers::CustomersBinder;
pub use params::{IterateParams, ListParams, WriteOptions};
pub use payments::{CustomerPaymentsBinder, PaymentsBinder};
pub use refunds::PaymentRefundsBinder;
