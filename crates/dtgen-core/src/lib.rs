//! Transmutation engine and generation driver.
//!
//! [`Transmuter`] turns one master text into the text of one target type;
//! [`Generator`] runs it over every non-default entry of a
//! [`DescriptorTable`](dtgen_model::DescriptorTable).

#![deny(unsafe_code)]

pub mod base_class;
pub mod driver;
pub mod engine;
pub mod rules;
pub mod specialize;

pub use driver::{GenerationReport, GenerationRequest, Generator, TargetFailure};
pub use engine::{Transmuter, transmutate};
pub use rules::{Rule, RuleSet};
pub use specialize::{DirectiveAction, IdiomRule, LineDirective, RuleTable, SpecializationRules};
