//! The fixed task table
//!
//! Every target maps to exactly one external tool invocation. The table is closed: a
//! [`target::Target`] is one of four variants, and turning a user-supplied name into a
//! target is the only place an unknown name can be rejected.
//!
//! A [`project::Project`] supplies the few values the invocations are parameterized by
//! (package name, tests directory, extra environment), so the argument lists themselves
//! never change shape.

pub mod invocation;
pub mod project;
pub mod target;
