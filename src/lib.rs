//! # formbuilder
//!
//! Form-schema builder: an in-memory form definition (title plus ordered,
//! typed fields), a selection-scoped property editor driven by the field
//! catalog, a pure preview projection, and a gateway to the remote form
//! service with stale-response protection.
//!
//! `backend` is an in-memory implementation of the form service and
//! `repl` a line-oriented front end; both sit on top of the core.

pub mod backend;
pub mod catalog;
pub mod editor;
pub mod form;
pub mod gateway;
pub mod notify;
pub mod preview;
pub mod repl;
pub mod session;
