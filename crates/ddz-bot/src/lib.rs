pub mod policy;

pub use policy::{Policy, PolicyContext, Strength, StrengthError, StrengthPolicy};
