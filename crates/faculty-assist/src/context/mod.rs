//! Background context for `/ask`
//!
//! `ContextBuilder` reads the sample images and documents and scrapes the
//! configured page. Handlers reach it through a `ContextProvider`, which
//! either rebuilds on every call or caches until refreshed.

mod builder;
mod provider;

pub use builder::ContextBuilder;
pub use provider::{CachedContextProvider, ContextProvider, LiveContextProvider};
