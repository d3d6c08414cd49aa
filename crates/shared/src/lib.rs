//! Wire-level types shared between the customer directory client and its UI:
//! domain records and the structured API failure payload.

pub mod domain;
pub mod error;
