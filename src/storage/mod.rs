//! Storage layer for the persisted favorites shelf.
//!
//! This module provides the persistence abstraction for the user's favorited
//! books. The whole shelf lives in one JSON blob written through on every
//! mutation, with the lenient failure policy the application wants: unreadable
//! data means an empty shelf, a failed write means the mutation is silently not
//! durable.
//!
//! # Modules
//!
//! - `backend`: [`FavoritesStore`] trait abstraction for backend implementations
//! - `json`: JSON blob file implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{AddOutcome, FavoritesStore};
pub use json::JsonFavorites;
pub use models::FavoriteRecord;
