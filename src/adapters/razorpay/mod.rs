//! Razorpay payment gateway adapter.

mod gateway;

pub use gateway::{RazorpayConfig, RazorpayGateway};
