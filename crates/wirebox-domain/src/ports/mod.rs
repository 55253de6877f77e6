//! Domain Port Interfaces
//!
//! Contracts between the container and the host application. The container
//! consumes these ports; implementations live with the embedding code or in
//! `wirebox-infrastructure`.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Service`] | A constructed object the container can configure and call |
//! | [`ClassResolver`] | Maps a class identifier to a factory |
//! | [`EventEmitter`] | External event source the container can forward from |

pub mod emitter;
pub mod resolver;
pub mod service;

pub use emitter::{EventEmitter, EventHandler};
pub use resolver::{ClassResolver, ServiceFactory};
pub use service::{Service, ServiceRef};
