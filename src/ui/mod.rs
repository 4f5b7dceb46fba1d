//! UI module for consistent CLI output
//!
//! Uses `cliclack` for interactive log lines and spinners, with automatic
//! fallback to plain output in CI/non-interactive environments. A quiet
//! context suppresses everything so stdout can carry machine output.
//!
//! # Example
//!
//! ```rust,ignore
//! use upscaler_setup::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "Upscaler Setup");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Searching for x4.pth in the file system...");
//! // ... do work ...
//! spinner.stop("Found /workspace/x4.pth");
//!
//! ui::outro_success(&ctx, "Upscaler set up successfully");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{intro, key_value, outro_error, outro_success, step_info};
pub use progress::TaskSpinner;
