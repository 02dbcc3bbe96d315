//! Resona - Audio device configuration and diagnostics for Linux desktops.
//!
//! Resona discovers the audio devices a PulseAudio or PipeWire server
//! knows about, reports their current state, and safely changes the
//! active default output or input device. The main features include:
//!
//! - Device discovery through the server's command-line control surface
//! - Verified default-device changes with single-attempt rollback
//! - Strict validation of device ids before they reach a subprocess
//! - An aggregated diagnostics report that survives partial failures
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resona::config::Config;
//! use resona::services::audio::{AudioConfigService, DeviceRole};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let service = AudioConfigService::new(&config.audio);
//!
//! for device in service.list_devices(DeviceRole::Sink).await? {
//!     println!("{} (default: {})", device.id, device.is_default);
//! }
//! # Ok(())
//! # }
//! ```

/// Application configuration loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface over the audio service.
pub mod cli;

/// Services for system integration.
pub mod services;

/// Tracing initialisation.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use self::core::{ResonaError, Result};
