//! WindowManager service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the
//! window system: listing top-level windows, querying the minimized state,
//! restoring and focusing a window. Matching titles against bindings is done
//! exclusively by WindowActivator.

mod detect;
mod dry_run;
mod ewmh;
mod r#trait;

#[cfg(test)]
pub use self::dry_run::{DryRunWindowManager, WindowCall};
pub use self::r#trait::{create_window_manager, WindowManager};
