//! Styled status lines
//!
//! Success and information lines go to stdout, warnings to stderr.

use console::Style;

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        println!("  {} {}", ::console::Style::new().bold().apply_to($label), $value);
    };
}

pub(crate) use display_field;

/// Print a section heading
pub fn heading(text: &str) {
    println!();
    println!("{}", Style::new().bold().green().apply_to(text));
}

/// Print a success line
pub fn success(text: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("✓"), text);
}

/// Print an informational line
pub fn info(text: &str) {
    println!("{} {}", Style::new().cyan().apply_to("•"), text);
}

/// Print a warning line to stderr
pub fn warning(text: &str) {
    eprintln!("{} {}", Style::new().yellow().bold().apply_to("!"), text);
}

/// Print a dimmed, indented detail line to stderr
pub fn detail(text: &str) {
    eprintln!("    {}", Style::new().dim().apply_to(text));
}

/// Human readable byte count (binary units)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
