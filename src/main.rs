use std::path::PathBuf;

use clap::Parser;

/// Replace absolute paths in a generated registry entry file with a placeholder
/// that the installer resolves at install time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Build output directory embedded in the registry entries (the CodeBase)
    code_directory: String,
    /// Registry entry file to read
    old_registry_entry_file: PathBuf,
    /// Where to write the fixed-up registry entry file (may be the same file)
    new_registry_entry_file: PathBuf,
    /// Placeholder token substituted for absolute paths
    #[arg(allow_hyphen_values = true)]
    search_tag: String,
    /// Anything after the search tag is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

fn main() -> Result<(), regfix::error::Fix> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);
    if !args.ignored.is_empty() {
        log::warn!("Ignoring extra arguments: {:?}", args.ignored);
    }

    regfix::fix(
        &args.code_directory,
        &args.old_registry_entry_file,
        &args.new_registry_entry_file,
        args.search_tag,
    )
}
