//! # Bootwire Kernel
//!
//! The `kernel` module drives application bootstrap. It owns the service
//! container, binds the shared collaborators every provider relies on, boots
//! the registered service providers and runs the lifecycle of kernel
//! components.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Bootstrapping**: [`Application`](bootstrap::Application) builds the
//!   container from [`ApplicationSettings`](bootstrap::ApplicationSettings), boots
//!   providers and runs components.
//! - **Service Container**: [`ServiceContainer`](component::ServiceContainer) maps concrete
//!   types to shared instances; [`KernelComponent`](component::KernelComponent) marks the
//!   instances whose `initialize`/`start`/`stop` lifecycle the kernel drives.
//! - **Core Constants**: names and defaults in the `constants` submodule.
//! - **Error Handling**: the kernel [`Error`](error::Error) and `Result` alias.
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;

pub use bootstrap::{Application, ApplicationSettings};
pub use component::{KernelComponent, ServiceContainer};
pub use error::{Error, Result};
