use log::Level;

/// Installs the console logger and panic hook. Safe to call more than once.
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    // Err only when a logger is already installed.
    console_log::init_with_level(level).ok();
}
