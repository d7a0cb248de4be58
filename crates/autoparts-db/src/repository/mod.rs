//! # Repository Module
//!
//! Typed access to the durable keys.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront state                                                      │
//! │       │                                                                 │
//! │       │  sessions().save(&user)      products().save_all(&list)        │
//! │       ▼                                                                 │
//! │  SessionRepository<S>              ProductRepository<S>                │
//! │  key "user"  → JSON User           key "products" → JSON [Product]     │
//! │       │                                     │                           │
//! │       └──────────────┬──────────────────────┘                           │
//! │                      ▼                                                  │
//! │              S: KeyValueStore (Database or MemoryStore)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories own only the JSON encoding and the key name. Each save is a
//! whole-value overwrite.

pub mod product;
pub mod session;
