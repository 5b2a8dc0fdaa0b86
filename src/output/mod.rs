//! Console output control with quiet/normal/verbose levels
//!
//! Diagnostics go to stderr so stdout stays reserved for the final
//! `exist`/`noexist` answer.

use std::time::Instant;

#[derive(Clone, Debug)]
pub struct OutputManager {
    pub verbose: bool,
    quiet: bool,
    start_time: Instant,
}

impl OutputManager {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            start_time: Instant::now(),
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            start_time: Instant::now(),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_with_timestamp("DEBUG", message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_with_timestamp("INFO", message);
        }
    }

    pub fn warning(&self, message: &str) {
        self.print_with_timestamp("WARN", message);
    }

    pub fn error(&self, message: &str) {
        self.print_with_timestamp("ERROR", message);
    }

    pub fn step(&self, step: &str) {
        if self.verbose {
            eprintln!("  🔸 {}", step);
        }
    }

    pub fn detail(&self, detail: &str) {
        if self.verbose {
            eprintln!("    📝 {}", detail);
        }
    }

    fn print_with_timestamp(&self, level: &str, message: &str) {
        if self.verbose {
            eprintln!(
                "[{:8.3}s] {} {}",
                self.start_time.elapsed().as_secs_f64(),
                level,
                message
            );
        } else {
            eprintln!("{}", message);
        }
    }
}
