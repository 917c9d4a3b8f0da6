//! qrsmith - generate QR codes as colored PNG files
//!
//! This library backs the `qrsmith` binary: it turns text into a QR module
//! grid via an external encoder, rasterizes the grid with configurable
//! foreground/background colors (straight alpha included), rescales the
//! result, and persists it as a PNG - optionally after an interactive
//! preview where the user confirms or cancels the save.
//!
//! # Example
//!
//! ```no_run
//! use qrsmith::pipeline::{self, GenerateRequest};
//! use qrsmith::{Color, EccLevel, MaskChoice, QrsmithConfig, VersionRange};
//!
//! fn main() -> qrsmith::Result<()> {
//!     let config = QrsmithConfig::default();
//!     let request = GenerateRequest {
//!         text: "https://example.org".to_string(),
//!         level: EccLevel::High,
//!         versions: VersionRange::FULL,
//!         mask: MaskChoice::Auto,
//!         boost_ecc: false,
//!         foreground: Color::BLACK,
//!         background: Color::WHITE,
//!         scale: 4.0,
//!         output: "qr.png".into(),
//!         verify: false,
//!     };
//!
//!     pipeline::run(&config, &request)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod qr;
pub mod render;

// Re-exports for convenience
pub use color::{Color, ColorParseError};
pub use config::QrsmithConfig;
pub use error::{Error, Result};
pub use pipeline::{GenerateRequest, RunOutcome};
pub use preview::{PreviewDecision, PreviewEvent, PreviewState, Verdict};
pub use qr::{EccLevel, MaskChoice, ModuleGrid, VersionRange};
