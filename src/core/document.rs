//! Merged document layout
//!
//! A header block holding the directory tree, then one section per file.

use std::io::{self, Write};

const RULE_WIDTH: usize = 80;
const HEADER_TITLE: &str = " DIRECTORY STRUCTURE";

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Write the `#` header block with the rendered tree
pub fn write_header<W: Write>(out: &mut W, root_label: &str, tree: &str) -> io::Result<()> {
    let hashes = rule('#');
    writeln!(out, "{hashes}")?;
    writeln!(out, "{HEADER_TITLE}")?;
    writeln!(out, "{hashes}")?;
    writeln!(out)?;
    writeln!(out, ". (ROOT: {root_label})")?;
    out.write_all(tree.as_bytes())?;
    writeln!(out)?;
    writeln!(out, "{hashes}")?;
    writeln!(out)
}

/// Write the `=` banner that opens a file section
pub fn write_section_header<W: Write>(out: &mut W, relative: &str) -> io::Result<()> {
    let equals = rule('=');
    writeln!(out)?;
    writeln!(out, "{equals}")?;
    writeln!(out, " FILE: {relative}")?;
    writeln!(out, "{equals}")?;
    writeln!(out)
}

/// Write a file's content verbatim, followed by a newline
pub fn write_section_body<W: Write>(out: &mut W, content: &str) -> io::Result<()> {
    out.write_all(content.as_bytes())?;
    writeln!(out)
}

/// Write the diagnostic that replaces an unreadable file's content
pub fn write_section_error<W: Write>(out: &mut W, error: &str) -> io::Result<()> {
    writeln!(out, "Error reading file: {error}")
}
