use std::io::{self, Write};

use owo_colors::OwoColorize;

pub fn title(text: &str) {
	eprintln!();
	eprintln!("{}", text.bold().cyan());
	eprintln!("{}", "=".repeat(text.chars().count()).cyan());
	eprintln!();
}

pub fn text(text: &str) {
	eprintln!(" {}", text);
}

pub fn breadcrumb(text: &str) {
	eprintln!();
	eprintln!(" {}", text.cyan());
	eprintln!();
}

pub fn success(message: &str) {
	eprintln!();
	eprintln!(" {} {}", "[OK]".green().bold(), message.green().bold());
	eprintln!();
}

pub fn warn(message: &str) {
	eprintln!(" {}", message.yellow().bold());
}

pub fn error(message: &str) {
	eprintln!("{}", error_line(message).red().bold());
}

pub fn error_line(message: &str) -> String {
	format!("error: {message}")
}

pub fn question(prompt: &str, hint: Option<&str>) {
	match hint {
		Some(hint) => eprintln!(" {} {}:", prompt.green(), hint.dimmed()),
		None => eprintln!(" {}:", prompt.green()),
	}
}

pub fn option(key: &str, label: &str, emphasis: bool) {
	let key = format!("[{key}]");
	if emphasis {
		eprintln!("  {} {}", key.green(), label.yellow());
	} else {
		eprintln!("  {} {}", key.green(), label);
	}
}

/// Print the input caret and read one line. `None` means stdin is closed.
pub fn read_reply() -> io::Result<Option<String>> {
	eprint!(" {} ", ">".bold());
	io::stderr().flush()?;

	let mut line = String::new();
	if io::stdin().read_line(&mut line)? == 0 {
		eprintln!();
		return Ok(None);
	}
	Ok(Some(line.trim().to_owned()))
}

pub fn file_header(path: &str) {
	println!("{}", format!("@ {path}").cyan());
}

pub fn match_line(line_number: usize, highlighted: &str) {
	println!("{} {}", format!("{line_number}:").green(), highlighted);
}

pub fn blank() {
	println!();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_line_is_prefixed() {
		assert_eq!(error_line("permission denied"), "error: permission denied");
	}
}
