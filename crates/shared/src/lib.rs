//! Types shared between the employee directory client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
