#![deny(unused)]
//! Dependency-injection container for CodeCrew.
//!
//! A lightweight, name-keyed container with three service lifetimes
//! (singleton, transient, factory) and hierarchical parent/child resolution.
//! Child containers shadow their parent's registrations without mutating
//! them, so a nested scope can swap one service for another — the mechanism
//! the test suites use to replace real LLM providers with mocks.
//!
//! There is deliberately no process-global container: the root container is
//! constructed at startup and passed down explicitly.

mod container;

pub use container::{
    Constructor, FactoryFn, Service, ServiceContainer, ServiceDescriptor, ServiceLifetime,
};
