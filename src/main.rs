use anyhow::Result;
use tabdeck::cli;

fn main() -> Result<()> {
    // Logging is initialized inside process_cli once the config is loaded,
    // since the config supplies the fallback log level.
    let code = cli::process_cli();
    log::logger().flush();
    if code != 0 {
        // No state is held here, so exiting directly skips nothing.
        std::process::exit(code);
    }
    Ok(())
}
