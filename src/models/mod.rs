// ABOUTME: Response models - typed records for every OpenAQ resource.
// ABOUTME: JSON is camelCase on the wire; decoding goes through Response::from_json.

mod common;
mod records;
mod response;

pub use common::*;
pub use records::*;
pub use response::*;

#[cfg(test)]
mod response_test;
