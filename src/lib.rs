//! Testbench: a small teaching harness that runs example-based tests against
//! a function, explains failures with hints, and tallies the results.

pub mod capture;
pub mod case;
pub mod cli;
pub mod demos;
pub mod hint;
pub mod subject;
pub mod suite;
pub mod test_harness;
pub mod value;

pub use crate::case::{IntoTestCase, TestCase};
pub use crate::subject::{Function, Subject, SubjectError};
pub use crate::test_harness::{Harness, HarnessConfig, Tally, TestResult};
pub use crate::value::Value;
