//! Handler for the `deps` subcommand.

use plinth::Capability;
use std::process::ExitCode;

/// Checks availability of the optional dependencies compiled into this build.
///
/// Prints one line per dependency to stdout unless `quiet` is set. The exit
/// code always reflects the outcome: success when everything requested is
/// available, failure otherwise.
pub fn check_dependencies(quiet: bool, check: Option<&str>) -> ExitCode {
    check.map_or_else(|| check_all(quiet), |name| check_one(quiet, name))
}

fn check_all(quiet: bool) -> ExitCode {
    let capabilities = plinth::capabilities();
    let missing = capabilities.iter().filter(|capability| !capability.enabled).count();

    if !quiet {
        for capability in &capabilities {
            print_capability(capability);
        }
    }

    if missing > 0 {
        eprintln!("Missing {missing} dependencies");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn check_one(quiet: bool, name: &str) -> ExitCode {
    let capability = plinth::capabilities().into_iter().find(|capability| capability.name == name);

    match capability {
        Some(capability) if capability.enabled => {
            if !quiet {
                print_capability(&capability);
            }
            ExitCode::SUCCESS
        },
        // Unknown names count as unavailable.
        _ => {
            eprintln!("Dependency check failed");
            ExitCode::FAILURE
        },
    }
}

fn print_capability(capability: &Capability) {
    let marker = if capability.enabled { "✅" } else { "❌" };
    println!("{marker} {}: {}", capability.name, capability.detail);
}
