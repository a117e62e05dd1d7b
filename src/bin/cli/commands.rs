//! Command implementations for the CLI tool.

use std::path::{Path, PathBuf};

use debpatch::edit::{ArchiveEditor, BackupPolicy, Replacement, parse_file_pair};
use debpatch::read::{Archive, ExtractOptions, OverwritePolicy, is_archive};
use debpatch::{ControlInfo, Error};

use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;
use crate::{OutputFormat, OverwriteMode};

/// Configuration for the add command.
pub struct AddConfig<'a> {
    pub control: Option<&'a Path>,
    pub backup: bool,
    pub args: &'a [String],
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Configuration for the extract command.
pub struct ExtractConfig<'a> {
    pub archive_path: &'a Path,
    pub member: Option<&'a str>,
    pub output_dir: &'a Path,
    pub overwrite: OverwriteMode,
    pub preserve_mtime: bool,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Add command implementation
pub fn add(config: &AddConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);

    let (archive_path, pairs) = match config.control {
        Some(control) => match ControlInfo::from_path(control) {
            Ok(info) => (PathBuf::from(info.deb_file_name()), config.args),
            Err(e) => return report(&e),
        },
        None => match config.args.split_first() {
            Some((archive, pairs)) => (PathBuf::from(archive), pairs),
            None => {
                eprintln!("Error: No archive given");
                return ExitCode::BadArgs;
            }
        },
    };

    if pairs.is_empty() {
        eprintln!("Warning: No files to be injected");
        return ExitCode::Warning;
    }

    // Validate every pair before touching the archive
    let mut replacements = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let replacement = parse_file_pair(pair)
            .and_then(|(source, target)| Replacement::from_source(source, target));
        match replacement {
            Ok(r) => replacements.push(r),
            Err(e) => return report(&e),
        }
    }

    let backup = if config.backup {
        BackupPolicy::Keep
    } else {
        BackupPolicy::None
    };

    let mut editor = match ArchiveEditor::open(&archive_path) {
        Ok(editor) => editor.backup(backup),
        Err(e) => return report(&e),
    };

    for replacement in replacements {
        if !config.quiet && config.format == OutputFormat::Human {
            println!("Injecting {}", replacement.target);
        }
        editor.replace(replacement);
    }

    match editor.commit() {
        Ok(result) => {
            if !config.quiet {
                print!(
                    "{}",
                    formatter.format_edit_result(&archive_path.display().to_string(), &result)
                );
            }
            ExitCode::Success
        }
        Err(e) => report(&e),
    }
}

/// List command implementation
pub fn list(archive_path: &Path, format: OutputFormat, quiet: bool) -> ExitCode {
    let formatter = create_formatter(format);

    let mut archive = match Archive::open_path(archive_path) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    let members: Result<Vec<_>, Error> = archive.members().collect();
    match members {
        Ok(members) => {
            if !quiet {
                print!("{}", formatter.format_list(&members));
            }
            ExitCode::Success
        }
        Err(e) => report(&e),
    }
}

/// Extract command implementation
pub fn extract(config: &ExtractConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);

    let mut archive = match Archive::open_path(config.archive_path) {
        Ok(a) => a,
        Err(e) => return report(&e),
    };

    let overwrite = match config.overwrite {
        OverwriteMode::Always => OverwritePolicy::Overwrite,
        OverwriteMode::Never => OverwritePolicy::Skip,
        OverwriteMode::Error => OverwritePolicy::Error,
    };
    let options = ExtractOptions::new()
        .overwrite(overwrite)
        .preserve_mtime(config.preserve_mtime);

    if let Err(e) = std::fs::create_dir_all(config.output_dir) {
        eprintln!("Error creating output directory: {}", e);
        return ExitCode::IoError;
    }

    match archive.extract(config.member, config.output_dir, &options) {
        Ok(result) => {
            if !config.quiet {
                print!("{}", formatter.format_extract_result(&result));
            }
            if result.is_empty() && result.members_skipped > 0 {
                ExitCode::Warning
            } else {
                ExitCode::Success
            }
        }
        Err(e) => report(&e),
    }
}

/// Check command implementation
pub fn check(path: &Path, quiet: bool) -> ExitCode {
    if is_archive(path) {
        if !quiet {
            println!("{}: ar archive", path.display());
        }
        ExitCode::Success
    } else {
        if !quiet {
            println!("{}: not an ar archive", path.display());
        }
        ExitCode::BadArchive
    }
}

fn report(error: &Error) -> ExitCode {
    eprintln!("Error: {}", error);
    error_to_exit_code(error)
}
