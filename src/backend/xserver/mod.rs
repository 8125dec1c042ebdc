// src/backend/xserver/mod.rs

//! X11 display backend.
//!
//! The connection is opened lazily on the first query and kept until the
//! target display changes or the backend is dropped.

pub mod adapter;
#[cfg(use_x11_backend)]
pub mod live;
pub mod mock;

use log::{debug, info, warn};

pub use adapter::XAdapter;
#[cfg(use_x11_backend)]
pub use live::LiveXAdapter;
pub use mock::MockXAdapter;

use super::DisplayBackend;
use crate::config::X11Config;
use crate::error::{copy_name, DisplayError, Result};
use crate::geometry::{Dpi, ScreenMetrics, ScreenSize};

#[cfg(use_x11_backend)]
pub type LiveX11Backend = X11Backend<LiveXAdapter>;

pub struct X11Backend<A: XAdapter> {
    adapter: A,
    /// Display set explicitly; `None` means the default display.
    target: Option<String>,
    fallback_to_default: bool,
    connection: Option<A::Connection>,
}

#[cfg(use_x11_backend)]
impl X11Backend<LiveXAdapter> {
    pub fn live(config: &X11Config) -> Result<Self> {
        Self::new(LiveXAdapter::new(), config)
    }
}

impl<A: XAdapter> X11Backend<A> {
    /// Fails with `InvalidDisplayName` when the configured name contains a NUL byte.
    pub fn new(adapter: A, config: &X11Config) -> Result<Self> {
        if let Some(name) = &config.display_name {
            check_display_name(name)?;
        }
        Ok(X11Backend {
            adapter,
            target: config.display_name.clone(),
            fallback_to_default: config.fallback_to_default,
            connection: None,
        })
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Closes the current connection, if any. The next query reconnects.
    pub fn disconnect(&mut self) {
        if self.connection.take().is_some() {
            debug!("X11Backend: connection dropped");
        }
    }

    fn metrics(&mut self) -> Result<ScreenMetrics> {
        if self.connection.is_none() {
            let connection = self.connect()?;
            self.connection = Some(connection);
        }
        match &self.connection {
            Some(connection) => self.adapter.screen_metrics(connection),
            None => Err(DisplayError::OpenDisplayFailed {
                name: self.target.clone(),
            }),
        }
    }

    fn connect(&self) -> Result<A::Connection> {
        let target = self.target.as_deref();
        let connection = match self.adapter.open_display(target) {
            Ok(connection) => connection,
            Err(DisplayError::OpenDisplayFailed { name: Some(name) }) if self.fallback_to_default => {
                warn!(
                    "Could not open X display {:?}; falling back to the default display",
                    name
                );
                self.adapter.open_display(None)?
            }
            Err(e) => return Err(e),
        };
        info!(
            "Connected to X display {}",
            self.adapter
                .display_string(&connection)
                .unwrap_or_else(|| "<unknown>".to_string())
        );
        Ok(connection)
    }
}

/// Names cross into C as NUL-terminated strings.
fn check_display_name(name: &str) -> Result<()> {
    if name.contains('\0') {
        return Err(DisplayError::InvalidDisplayName {
            name: name.to_string(),
        });
    }
    Ok(())
}

impl<A: XAdapter> DisplayBackend for X11Backend<A> {
    fn name(&self) -> &'static str {
        "x11"
    }

    fn screen_size(&mut self) -> Result<ScreenSize> {
        self.metrics()?.size()
    }

    fn set_display_name(&mut self, name: &str) -> Result<()> {
        check_display_name(name)?;
        info!("Targeting X display {:?}", name);
        self.target = Some(copy_name(name)?);
        self.disconnect();
        Ok(())
    }

    fn display_name(&mut self) -> Result<String> {
        match &self.target {
            Some(name) => copy_name(name),
            None => match self.adapter.default_display_name() {
                Some(name) => copy_name(&name),
                None => Err(DisplayError::NoDisplayName),
            },
        }
    }

    fn dpi(&mut self) -> Result<Dpi> {
        Ok(self.metrics()?.dpi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: ScreenMetrics = ScreenMetrics {
        width_px: 2560,
        height_px: 1440,
        width_mm: 541,
        height_mm: 304,
    };
    const SECONDARY: ScreenMetrics = ScreenMetrics {
        width_px: 1280,
        height_px: 1024,
        width_mm: 338,
        height_mm: 270,
    };

    fn backend(adapter: &MockXAdapter, config: &X11Config) -> X11Backend<MockXAdapter> {
        X11Backend::new(adapter.clone(), config).unwrap()
    }

    fn two_servers() -> MockXAdapter {
        MockXAdapter::new()
            .with_server(":0", PRIMARY)
            .with_server(":1", SECONDARY)
            .with_default_display(":0")
    }

    #[test_log::test]
    fn connects_lazily_and_reuses_connection() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        assert!(!x11.is_connected());
        assert_eq!(adapter.open_count(), 0);

        let first = x11.screen_size().unwrap();
        let second = x11.screen_size().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, ScreenSize { width: 2560, height: 1440 });
        assert_eq!(adapter.open_count(), 1);
    }

    #[test_log::test]
    fn set_name_round_trips_and_reconnects() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        x11.screen_size().unwrap();

        x11.set_display_name(":1").unwrap();
        assert!(!x11.is_connected());
        assert_eq!(adapter.live_connections(), 0);
        assert_eq!(x11.display_name().unwrap(), ":1");

        assert_eq!(
            x11.screen_size().unwrap(),
            ScreenSize { width: 1280, height: 1024 }
        );
        assert_eq!(adapter.opened(), vec![":0".to_string(), ":1".to_string()]);
    }

    #[test_log::test]
    fn display_name_falls_back_to_default_then_errors() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        assert_eq!(x11.display_name().unwrap(), ":0");

        adapter.set_default_display(None);
        assert!(matches!(x11.display_name(), Err(DisplayError::NoDisplayName)));
    }

    #[test_log::test]
    fn unreachable_target_falls_back_when_enabled() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        x11.set_display_name(":5").unwrap();

        assert_eq!(x11.screen_size().unwrap().width, 2560);
        assert_eq!(adapter.opened(), vec![":0".to_string()]);
        // The requested name is still what the caller set.
        assert_eq!(x11.display_name().unwrap(), ":5");
    }

    #[test_log::test]
    fn unreachable_target_errors_without_fallback() {
        let adapter = two_servers();
        let config = X11Config {
            display_name: Some(":5".to_string()),
            fallback_to_default: false,
        };
        let mut x11 = backend(&adapter, &config);

        let err = x11.screen_size().unwrap_err();
        assert!(matches!(err, DisplayError::OpenDisplayFailed { name: Some(ref n) } if n == ":5"));
        assert!(!x11.is_connected());
    }

    #[test_log::test]
    fn nul_name_is_rejected_without_side_effects() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        x11.screen_size().unwrap();

        let err = x11.set_display_name(":1\0").unwrap_err();
        assert!(matches!(err, DisplayError::InvalidDisplayName { .. }));
        assert!(x11.is_connected());
        assert_eq!(x11.display_name().unwrap(), ":0");
    }

    #[test_log::test]
    fn dpi_comes_from_physical_size() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        let dpi = x11.dpi().unwrap();
        assert_eq!(dpi, Dpi { x: 120, y: 120 });
        assert_eq!(dpi.scale_percent(), 125);
    }

    #[test_log::test]
    fn dropping_backend_closes_connection() {
        let adapter = two_servers();
        {
            let mut x11 = backend(&adapter, &X11Config::default());
            x11.screen_size().unwrap();
            assert_eq!(adapter.live_connections(), 1);
        }
        assert_eq!(adapter.live_connections(), 0);
    }

    #[test_log::test]
    fn configured_name_with_nul_is_rejected() {
        let adapter = two_servers();
        let config = X11Config {
            display_name: Some(":1\0evil".to_string()),
            ..X11Config::default()
        };
        let result = X11Backend::new(adapter.clone(), &config);
        assert!(matches!(
            result,
            Err(DisplayError::InvalidDisplayName { ref name }) if name == ":1\0evil"
        ));
        assert_eq!(adapter.open_count(), 0);
    }

    #[test_log::test]
    fn default_display_name_is_an_owned_copy() {
        let adapter = two_servers();
        let mut x11 = backend(&adapter, &X11Config::default());
        let name = x11.display_name().unwrap();
        adapter.set_default_display(Some(":1"));
        assert_eq!(name, ":0");
        assert_eq!(x11.display_name().unwrap(), ":1");
    }
}
