//! HTTP handlers for the company and invoice resources.

pub mod company;
pub mod invoice;
