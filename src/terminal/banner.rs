//! Startup banner.

use colored::Colorize;

const LOGO: &str = r"
  ██████╗  █████╗ ██╗ █████╗      ██████╗██╗  ██╗ █████╗ ████████╗
 ██╔════╝ ██╔══██╗██║██╔══██╗    ██╔════╝██║  ██║██╔══██╗╚══██╔══╝
 ██║  ███╗███████║██║███████║    ██║     ███████║███████║   ██║
 ██║   ██║██╔══██║██║██╔══██║    ██║     ██╔══██║██╔══██║   ██║
 ╚██████╔╝██║  ██║██║██║  ██║    ╚██████╗██║  ██║██║  ██║   ██║
  ╚═════╝ ╚═╝  ╚═╝╚═╝╚═╝  ╚═╝     ╚═════╝╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝";

/// Print the logo and a title line.
pub fn display_banner(title: &str) {
    println!("{}", LOGO.cyan());
    println!("{} v{}\n", title.yellow().bold(), env!("CARGO_PKG_VERSION"));
}
