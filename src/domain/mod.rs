//! Domain Layer
//!
//! Types and ports of the orchestration engine, free of process or network I/O.
//!
//! ## Structure
//!
//! - `entities/` - Active environment and command outcomes
//! - `value_objects/` - Stages, step ids, shell commands, secret keys
//! - `ports/` - Interfaces implemented by the infrastructure layer
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Commands are built here and executed elsewhere
//! 2. **Ports & Adapters** - Every shell and every progress sink is a trait object

pub mod entities;
pub mod ports;
pub mod value_objects;
