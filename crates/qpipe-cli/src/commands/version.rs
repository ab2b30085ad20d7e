//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - circuit passes and Braket hybrid jobs",
        style("qpipe").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpipe-ir              Circuit intermediate representation");
    println!("  qpipe-compile         Pass interface and pass manager");
    println!("  qpipe-hal             Backend and hybrid-job interfaces");
    println!("  qpipe-adapter-sim     Local statevector simulator");
    if cfg!(feature = "braket") {
        println!("  qpipe-adapter-braket  Amazon Braket hybrid jobs");
    }
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
