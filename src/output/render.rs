//! Row rendering for listed entries
//!
//! Three layouts, checked in order:
//! - disk usage: `<bytes> <path>` and nothing else
//! - minimal: the path, followed by owners and version when requested
//! - full: type and share flags, role, owners, version, then size, id,
//!   modification time and path columns

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::entry::Entry;
use crate::paths::row_path;

use super::config::Presentation;
use super::utils::{format_mod_time, format_size};

fn dir_color() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Blue)).set_bold(true);
    spec
}

/// Write `text`, coloured like a directory when `is_dir` is set.
fn write_name<W: WriteColor + ?Sized>(out: &mut W, text: &str, is_dir: bool) -> io::Result<()> {
    if is_dir {
        out.set_color(&dir_color())?;
        write!(out, "{}", text)?;
        out.reset()
    } else {
        write!(out, "{}", text)
    }
}

/// Render one entry as a single output line.
pub fn render_entry<W: WriteColor + ?Sized>(
    out: &mut W,
    entry: &Entry,
    opts: &Presentation,
) -> io::Result<()> {
    let path = row_path(&opts.parent, &entry.name);

    if opts.disk_usage_only {
        write!(out, "{:<12} ", entry.size)?;
        write_name(out, &path, entry.is_dir)?;
        return writeln!(out);
    }

    if opts.minimal {
        write_name(out, &path, entry.is_dir)?;
    } else {
        if entry.is_dir {
            write_name(out, "d", true)?;
        } else {
            write!(out, "-")?;
        }
        write!(out, "{}", if entry.shared { "s" } else { "-" })?;

        if let Some(role) = entry.role() {
            write!(out, " {:<10} ", role)?;
        }
    }

    if opts.show_owners && !entry.owner_names.is_empty() {
        write!(out, " {} ", entry.owner_names.join(" & "))?;
    }

    if opts.show_version {
        write!(out, " v{}", entry.version)?;
    }

    if !opts.minimal {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, " {:<10}", format_size(entry.size))?;
        out.reset()?;
        write!(
            out,
            "\t{:<10}\t\t{:<20}\t",
            entry.id,
            format_mod_time(&entry.mod_time)
        )?;
        write_name(out, &path, entry.is_dir)?;
    }

    writeln!(out)
}
