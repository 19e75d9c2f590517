//! Status, verbose and error output.
//!
//! Everything here writes to stderr so that stdout carries only report content.

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("Verbose: {}", msg);
    }
}

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

pub fn log_warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

/// Output switches shared by the dispatcher and the fetchers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        // verbose output wins over quiet if both are requested
        Self {
            verbose,
            quiet: quiet && !verbose,
        }
    }

    /// Logger that prints nothing except errors and warnings.
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    /// Progress line shown unless `--quiet` was given
    pub fn status(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", msg);
        }
    }

    pub fn verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn error(&self, msg: &str) {
        log_error(msg);
    }

    pub fn warning(&self, msg: &str) {
        log_warning(msg);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_flags() {
        let logger = Logger::new(true, false);
        assert!(logger.is_verbose());
        assert!(!logger.is_quiet());

        let logger = Logger::new(false, true);
        assert!(!logger.is_verbose());
        assert!(logger.is_quiet());
    }

    #[test]
    fn test_verbose_overrides_quiet() {
        let logger = Logger::new(true, true);
        assert!(logger.is_verbose());
        assert!(!logger.is_quiet());
    }

    #[test]
    fn test_silent_logger() {
        let logger = Logger::silent();
        assert!(logger.is_quiet());
        assert!(!logger.is_verbose());
        // must not panic
        logger.status("hidden");
        logger.verbose("hidden");
    }
}
