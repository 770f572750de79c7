/* This file is part of ProfitUnity DAO
 *
 * Copyright (C) 2022-2026 ProfitUnity developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{fs, io::Write, path::Path};

use simplelog::{ConfigBuilder, LevelFilter};

use crate::Result;

/// Write the default config file at `path` if none exists yet, then ask the
/// user to review it and exit.
pub fn spawn_config(path: &Path, contents: &[u8]) -> Result<()> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(contents)?;
        println!("Config file created in {:?}. Please review it and try again.", path);
        std::process::exit(2);
    }

    Ok(())
}

/// Map `-v` occurrences to a log level.
pub fn get_log_level(verbosity_level: u8) -> LevelFilter {
    match verbosity_level {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Build the logger config. The `LOG_TARGETS` environment variable holds a
/// comma-separated list of targets to allow, or to ignore when prefixed
/// with `!`.
pub fn get_log_config(verbosity_level: u8) -> simplelog::Config {
    let mut cfg = ConfigBuilder::new();

    match verbosity_level {
        0 | 1 => cfg.set_target_level(LevelFilter::Off),
        _ => cfg.set_target_level(LevelFilter::Error),
    };

    if let Ok(targets) = std::env::var("LOG_TARGETS") {
        for target in targets.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match target.strip_prefix('!') {
                Some(ignored) => cfg.add_filter_ignore(ignored.to_string()),
                None => cfg.add_filter_allow(target.to_string()),
            };
        }
    }

    cfg.build()
}

/// Install the terminal logger, plus a file logger when `log_file` is set.
pub fn init_logger(verbosity_level: u8, log_file: Option<&str>) -> Result<()> {
    let log_level = get_log_level(verbosity_level);
    let log_config = get_log_config(verbosity_level);

    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        log_level,
        log_config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let path = super::path::expand_path(path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        loggers.push(simplelog::WriteLogger::new(log_level, log_config, file));
    }

    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

/// Build the `about` string of a binary: package name, version,
/// description and logo.
#[macro_export]
macro_rules! cli_desc {
    () => {{
        let desc = format!(
            "{} {}\n{}\n{}",
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            env!("CARGO_PKG_DESCRIPTION").to_string(),
            $crate::ANSI_LOGO,
        );

        Box::leak(desc.into_boxed_str()) as &'static str
    }};
}

/// Generate a `main` that loads `Args` from the command line and the config
/// file (spawning the default config on first run), installs the logger and
/// drives `$realmain` on the current thread. Errors are printed to stderr and
/// the process exits with status 1.
///
/// The calling binary must define `Args` (with `config`, `log` and `verbose`
/// fields), `CONFIG_FILE` and `CONFIG_FILE_CONTENTS`, and have
/// `StructOptToml` in scope.
#[macro_export]
macro_rules! async_daemonize {
    ($realmain:ident) => {
        fn main() {
            let args = match Args::from_args_with_toml("") {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Error: {}", $crate::Error::ConfigInvalid(e.to_string()));
                    std::process::exit(1);
                }
            };

            let args = match $crate::util::cli::load_args_with_config(
                args.config.clone(),
                CONFIG_FILE,
                CONFIG_FILE_CONTENTS,
                |toml| Args::from_args_with_toml(toml).map_err(|e| e.to_string()),
            ) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = $crate::util::cli::init_logger(args.verbose, args.log.as_deref()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            if let Err(e) = smol::block_on($realmain(args)) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    };
}

/// Resolve the config file path, spawn the default config if missing, and
/// re-parse the arguments on top of its contents.
pub fn load_args_with_config<T>(
    config: Option<String>,
    fallback: &str,
    contents: &str,
    parse: impl Fn(&str) -> std::result::Result<T, String>,
) -> Result<T> {
    let cfg_path = super::path::get_config_path(config, fallback)?;
    spawn_config(&cfg_path, contents.as_bytes())?;
    let toml = fs::read_to_string(&cfg_path)?;
    parse(&toml).map_err(crate::Error::ConfigInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(get_log_level(0), LevelFilter::Warn);
        assert_eq!(get_log_level(1), LevelFilter::Info);
        assert_eq!(get_log_level(2), LevelFilter::Debug);
        assert_eq!(get_log_level(7), LevelFilter::Trace);
    }
}
