/// Centralized argument handling for Orbitra
///
/// Consolidates command-line argument access and debug flag checking so the
/// rest of the codebase never touches `std::env::args()` directly.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// Cache module debug mode
pub fn is_debug_cache_enabled() -> bool {
    has_arg("--debug-cache")
}

/// Upstream tracker debug mode
pub fn is_debug_tracker_enabled() -> bool {
    has_arg("--debug-tracker")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// WebSocket hub debug mode
pub fn is_debug_hub_enabled() -> bool {
    has_arg("--debug-hub")
}

/// Global verbose mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Help request
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Print help text for the binary
pub fn print_help() {
    println!("Orbitra - live ISS position server");
    println!();
    println!("USAGE:");
    println!("    orbitra [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    -h, --help              Print this help text");
    println!("        --verbose           Show verbose-level logs");
    println!("        --debug-cache       Debug logs for the expiring store");
    println!("        --debug-tracker     Debug logs for the upstream fetcher");
    println!("        --debug-webserver   Debug logs for HTTP handlers");
    println!("        --debug-hub         Debug logs for the WebSocket hub");
    println!();
    println!("ENVIRONMENT:");
    println!("    PORT                Listen port (default 8080)");
    println!("    ISS_API_URL         Upstream position API URL");
    println!("    CACHE_TIMEOUT       Fetcher freshness window in seconds (default 300)");
    println!("    POSITION_CACHE_TTL  Store TTL for served positions in seconds (default 5)");
    println!("    REQUEST_TIMEOUT     Upstream request timeout in seconds (default 10)");
}
