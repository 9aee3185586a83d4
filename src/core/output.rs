//! Unified output formatting for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: red for errors, green for success, yellow
//!   for recovery suggestions
//! - **Standardized spacing**: newline before and after command outputs
//! - **Hints travel with failures**: every error with a recovery hint prints
//!   that hint before the process exits

use crate::core::error::AiCommitError;
use colored::*;

/// Formats and prints an error message with consistent styling
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints an error followed by its recovery hint, when one applies
pub fn print_failure(err: &AiCommitError) {
    println!("\n{} {}", "✕ Error:".red(), err.to_string().white());
    let hint = err.recovery_hint();
    println!("\n{}", "💡 Recovery suggestion:".yellow());
    for line in hint.lines() {
        println!("  {}", line.white());
    }
    println!();
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}
