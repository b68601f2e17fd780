//! Client library for the FinSolve corporate-intelligence assistant.
//!
//! Two thin components: a [`rag::BackendClient`] that performs one
//! request/response exchange per query against the remote RAG service,
//! and a [`chat::ChatController`] that maintains role-scoped chat
//! sessions in memory around it.

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(unsafe_code)] // Le code unsafe est interdit
#![deny(missing_docs)] // Tout élément public doit être documenté
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(non_snake_case)]
#![deny(non_camel_case_types)]
#![forbid(unsafe_op_in_unsafe_fn)]

// Clippy pour stricte discipline
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)] // Interdit unwrap() hors tests
#![deny(clippy::expect_used)] // Interdit expect() hors tests
#![deny(clippy::panic)] // Interdit panic!() en production
#![deny(clippy::print_stdout)] // Interdit println!() en production
#![warn(clippy::pedantic)]

/// Session lifecycle: sessions, messages, and the send protocol.
pub mod chat;
/// HTTP client for the role-scoped RAG backend.
pub mod rag;
/// Access roles and their permission-group mapping.
pub mod roles;
