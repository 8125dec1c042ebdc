// tests/display_context_tests.rs

use std::sync::Arc;
use std::thread;

use display_shim::backend::xserver::MockXAdapter;
use display_shim::{
    DisplayContext, DisplayError, NullBackend, Operation, ScreenMetrics, ScreenSize, X11Backend,
    X11Config,
};

const MAIN: ScreenMetrics = ScreenMetrics {
    width_px: 1920,
    height_px: 1080,
    width_mm: 406,
    height_mm: 228,
};
const SIDE: ScreenMetrics = ScreenMetrics {
    width_px: 1024,
    height_px: 768,
    width_mm: 0,
    height_mm: 0,
};

fn mock_servers() -> MockXAdapter {
    MockXAdapter::new()
        .with_server(":0", MAIN)
        .with_server(":1", SIDE)
        .with_default_display(":0")
}

fn x11_context(adapter: &MockXAdapter) -> DisplayContext {
    let backend = X11Backend::new(adapter.clone(), &X11Config::default()).unwrap();
    DisplayContext::with_backend(Box::new(backend))
}

fn null_context() -> DisplayContext {
    DisplayContext::with_backend(Box::new(NullBackend::new()))
}

#[test_log::test]
fn screen_size_is_positive_and_stable() {
    let ctx = x11_context(&mock_servers());
    let first = ctx.get_screen_size().unwrap();
    assert!(first.width > 0 && first.height > 0);
    for _ in 0..5 {
        assert_eq!(ctx.get_screen_size().unwrap(), first);
    }
}

#[test_log::test]
fn set_then_get_round_trips() {
    let adapter = mock_servers();
    let ctx = x11_context(&adapter);
    ctx.set_x_display_name(":1").unwrap();
    assert_eq!(ctx.get_x_display_name().unwrap(), ":1");
    assert_eq!(
        ctx.get_screen_size().unwrap(),
        ScreenSize {
            width: 1024,
            height: 768
        }
    );
}

#[test_log::test]
fn missing_display_name_is_an_explicit_error() {
    let adapter = MockXAdapter::new().with_server(":0", MAIN);
    let ctx = x11_context(&adapter);
    assert!(matches!(
        ctx.get_x_display_name(),
        Err(DisplayError::NoDisplayName)
    ));
}

#[test_log::test]
fn null_backend_refuses_x11_without_side_effects() {
    let ctx = null_context();
    let err = ctx.set_x_display_name(":1").unwrap_err();
    assert!(matches!(
        err,
        DisplayError::UnsupportedPlatform {
            operation: Operation::SetXDisplayName
        }
    ));

    let err = ctx.get_x_display_name().unwrap_err();
    assert_eq!(err.to_string(), "GetXDisplayName is only supported on Linux");

    // Still refused the same way after the failed setter.
    let again = ctx.get_x_display_name().unwrap_err();
    assert_eq!(again.to_string(), err.to_string());
}

#[test_log::test]
fn scale_helpers_use_x_dpi() {
    let adapter = mock_servers();
    let ctx = x11_context(&adapter);
    // 1920 px over 406 mm is 120 dpi.
    assert_eq!(ctx.scale_percent().unwrap(), 125);
    assert_eq!(ctx.scale_value(100).unwrap(), 125);
    assert_eq!(
        ctx.scaled_screen_size().unwrap(),
        ScreenSize {
            width: 2400,
            height: 1350
        }
    );

    // Unknown physical size counts as unscaled.
    ctx.set_x_display_name(":1").unwrap();
    assert_eq!(ctx.scale_percent().unwrap(), 100);
}

#[test_log::test]
fn concurrent_setters_leave_a_complete_name() {
    let adapter = mock_servers();
    let ctx = Arc::new(x11_context(&adapter));
    let names = [":0", ":1"];

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            let name = names[i % names.len()];
            thread::spawn(move || {
                for _ in 0..50 {
                    ctx.set_x_display_name(name).unwrap();
                    let current = ctx.get_x_display_name().unwrap();
                    assert!(names.contains(&current.as_str()), "got {:?}", current);
                    ctx.get_screen_size().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(adapter.live_connections() <= 1);
}

#[test_log::test]
fn scale_value_reports_overflow_instead_of_wrapping() {
    let ctx = x11_context(&mock_servers());
    assert_eq!(ctx.scale_percent().unwrap(), 125);
    assert!(matches!(
        ctx.scale_value(i32::MAX),
        Err(DisplayError::ScaleOverflow { value: i32::MAX, percent: 125 })
    ));
}
