//! NPC gateway engine library.
//!
//! This crate contains all server-side code for the NPC dialogue gateway.
//!
//! ## Structure
//!
//! - `use_cases/` - Request validation and NPC reply generation
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod prompt_templates;
pub mod use_cases;

pub use app::App;
