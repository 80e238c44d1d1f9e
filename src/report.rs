// src/report.rs
//! Console output for a gate verdict.
//!
//! Deliberately thin: the classified lists themselves are the real output
//! surface; this renders counts and the offending violations for humans.

use colored::Colorize;

use crate::gate::GateVerdict;
use crate::types::Violation;

pub fn print_verdict(verdict: &GateVerdict) {
    if !verdict.permissive.is_empty() {
        println!(
            "{} ({}):",
            "Permissive violations".yellow().bold(),
            verdict.permissive.len()
        );
        for violation in &verdict.permissive {
            print_violation(violation);
        }
        println!();
    }

    if !verdict.non_permissive.is_empty() {
        println!(
            "{} ({}):",
            "Non-permissive violations".red().bold(),
            verdict.non_permissive.len()
        );
        for violation in &verdict.non_permissive {
            print_violation(violation);
        }
        println!();
    }

    if verdict.passed() {
        println!("{} {}", "PASS".green().bold(), verdict.summary());
    } else {
        println!("{} {}", "FAIL".red().bold(), verdict.summary());
    }
}

fn print_violation(violation: &Violation) {
    let location = match violation.line {
        Some(line) => format!("{}:{}:{}", violation.relative_path, line, violation.column),
        None => violation.relative_path.clone(),
    };

    println!(
        "  [{}] {} {} ({})",
        violation.severity.name().bold(),
        location.cyan(),
        violation.description,
        violation.rule.dimmed()
    );
}
